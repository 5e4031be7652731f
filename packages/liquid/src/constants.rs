pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 60 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const ONE_DAY_IN_SECONDS: u64 = 86_400;

pub const MIN_UNBONDING_PERIOD: u64 = 1;
pub const MAX_UNBONDING_PERIOD: u64 = 365 * ONE_DAY_IN_SECONDS;

pub const MAX_BPS: u32 = 10_000;

pub const MAX_TOKEN_DECIMALS: u32 = 18;
