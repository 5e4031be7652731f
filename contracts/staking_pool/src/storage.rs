use liquid::{
    constants::{
        INSTANCE_BUMP_AMOUNT,
        INSTANCE_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    error::{ ErrorCode, LiquidResult },
};
use soroban_sdk::{ contracttype, Address, Env, Vec };

#[derive(Clone)]
#[contracttype]
pub struct AllowanceDataKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Initialized,
    Config,
    Ledger,
    State,
    Cursors,
    Migration,
    Shares(Address),
    Unlock(u64),
    Allowance(AllowanceDataKey),
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum Operation {
    Deposit,
    Redeem,
    Transfer,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// SEP-41 token staked with the external network
    pub underlying: Address,
    /// Network adapter implementing `StakingAdapter`
    pub adapter: Address,
    /// Validator new unlock requests are tied to
    pub validator: Address,
    /// Receives the reward fee as pool shares
    pub treasury: Address,
    /// Seconds between an unlock request and its maturity
    pub unbonding_period: u64,
    /// The network compounds rewards into the stake instead of paying them out
    pub auto_restake: bool,
    /// Submit all requested unlocks with a single adapter call
    pub batch_unstake: bool,
    /// Upper bound of queue entries handled per task invocation
    pub max_batch_size: u32,
    pub reward_fee_bps: u32,
    pub paused_operations: Vec<Operation>,
}

impl Config {
    pub fn is_operation_paused(&self, operation: &Operation) -> bool {
        self.paused_operations.contains(operation)
    }
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> LiquidResult<Config> {
    env.storage().instance().get(&DataKey::Config).ok_or(ErrorCode::NotInitialized)
}

// ################################################################
//                             Ledger
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LedgerTotals {
    pub total_pooled_value: i128,
    pub total_shares: i128,
}

pub fn save_ledger_totals(env: &Env, totals: &LedgerTotals) {
    env.storage().instance().set(&DataKey::Ledger, totals);
}

pub fn get_ledger_totals(env: &Env) -> LedgerTotals {
    env.storage().instance().get(&DataKey::Ledger).unwrap_or_default()
}

pub fn read_shares(env: &Env, holder: &Address) -> i128 {
    let key = DataKey::Shares(holder.clone());
    if let Some(shares) = env.storage().persistent().get::<DataKey, i128>(&key) {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
        shares
    } else {
        0
    }
}

pub fn write_shares(env: &Env, holder: &Address, shares: i128) {
    let key = DataKey::Shares(holder.clone());
    if shares == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &shares);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ################################################################
//                        Stake lifecycle
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Principal at stake with the network, excluding the unbonding queue
    pub current_principal: i128,
    /// Sum of queue entries still `Requested` or `Unstaking`
    pub total_unbonding: i128,
    /// Underlying held by the pool and available for redemptions
    pub liquid_reserve: i128,
    pub last_rebase_at: u64,
    /// Reward applied by the most recent rebase
    pub accrued_rewards: i128,
}

pub fn save_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn get_state(env: &Env) -> PoolState {
    env.storage().instance().get(&DataKey::State).unwrap_or_default()
}

#[contracttype]
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum UnlockStatus {
    Requested,
    Unstaking,
    Withdrawable,
    Withdrawn,
    Cancelled,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockRequest {
    pub id: u64,
    pub amount: i128,
    pub requested_at: u64,
    pub matures_at: u64,
    pub status: UnlockStatus,
    /// Validator the unbonding is tied to
    pub target: Address,
    /// Adapter handle, set once the request is unstaking
    pub handle: u64,
    /// Amount realized at settlement
    pub settled: i128,
}

/// Arena cursors over the unlock queue.
///
/// Ids in `[withdraw_cursor, unstake_cursor)` were handed to the adapter,
/// ids in `[unstake_cursor, next_id)` are still requested. Everything below
/// `withdraw_cursor` is settled and pruned.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueueCursors {
    pub next_id: u64,
    pub unstake_cursor: u64,
    pub withdraw_cursor: u64,
}

pub fn save_cursors(env: &Env, cursors: &QueueCursors) {
    env.storage().instance().set(&DataKey::Cursors, cursors);
}

pub fn get_cursors(env: &Env) -> QueueCursors {
    env.storage().instance().get(&DataKey::Cursors).unwrap_or_default()
}

/// A validator switch that has not yet visited every unsettled entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockMigration {
    pub previous_target: Address,
    pub new_target: Address,
    /// Next queue id to inspect
    pub cursor: u64,
    /// Exclusive end: entries requested after the switch already carry the
    /// new target
    pub end: u64,
}

pub fn save_migration(env: &Env, migration: &UnlockMigration) {
    env.storage().instance().set(&DataKey::Migration, migration);
}

pub fn get_migration(env: &Env) -> Option<UnlockMigration> {
    env.storage().instance().get(&DataKey::Migration)
}

pub fn remove_migration(env: &Env) {
    env.storage().instance().remove(&DataKey::Migration);
}

pub fn save_unlock(env: &Env, request: &UnlockRequest) {
    let key = DataKey::Unlock(request.id);
    env.storage().persistent().set(&key, request);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_unlock(env: &Env, id: u64) -> LiquidResult<UnlockRequest> {
    let key = DataKey::Unlock(id);
    let request = env.storage()
        .persistent()
        .get::<_, UnlockRequest>(&key)
        .ok_or(ErrorCode::UnlockNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    Ok(request)
}

pub fn remove_unlock(env: &Env, id: u64) {
    env.storage().persistent().remove(&DataKey::Unlock(id));
}

// ################################################################
//                             Utils
// ################################################################

pub mod utils {
    use soroban_sdk::log;

    use super::*;

    pub fn bump_instance(env: &Env) {
        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().get(&DataKey::Initialized).unwrap_or(false)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        bump_instance(env);
    }

    pub fn save_admin(env: &Env, address: &Address) {
        env.storage().instance().set(&DataKey::Admin, address);
    }

    pub fn get_admin(env: &Env) -> LiquidResult<Address> {
        env.storage().instance().get(&DataKey::Admin).ok_or(ErrorCode::NotInitialized)
    }

    /// Loads the admin and requires its authorization for the current call.
    pub fn require_admin(env: &Env) -> LiquidResult<Address> {
        let admin = get_admin(env)?;
        admin.require_auth();
        Ok(admin)
    }

    pub fn check_not_paused(env: &Env, config: &Config, operation: Operation) -> LiquidResult {
        if config.is_operation_paused(&operation) {
            log!(env, "Liquid Staking: operation is paused");
            return Err(ErrorCode::OperationPaused);
        }
        Ok(())
    }
}
