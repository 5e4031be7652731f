use liquid::error::ErrorCode;
use soroban_sdk::{ Address, Env, String, Vec };

use crate::{ msg::PoolStateResponse, storage::{ Config, Operation, UnlockMigration, UnlockRequest } };

pub trait LiquidStakingTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(
        env: Env,
        admin: Address,
        config: Config,
        decimal: u32,
        name: String,
        symbol: String
    ) -> Result<(), ErrorCode>;

    fn update_config(
        env: Env,
        treasury: Option<Address>,
        batch_unstake: Option<bool>,
        max_batch_size: Option<u32>,
        reward_fee_bps: Option<u32>
    ) -> Result<(), ErrorCode>;

    fn set_paused_operations(env: Env, paused_operations: Vec<Operation>) -> Result<(), ErrorCode>;

    fn request_unlock(env: Env, amount: i128) -> Result<u64, ErrorCode>;

    fn cancel_unlock(env: Env, id: u64) -> Result<(), ErrorCode>;

    /// Re-targets in-flight unlocks to `new_target`, at most `max_batch_size`
    /// entries per call. Repeat with the same target until
    /// `query_migration` returns `None`.
    fn migrate_unlock(env: Env, new_target: Address) -> Result<u32, ErrorCode>;

    fn restake(env: Env, amount: i128) -> Result<(), ErrorCode>;

    // ################################################################
    //                             KEEPER
    // ################################################################

    fn process_unstake(env: Env) -> Result<u32, ErrorCode>;

    fn process_withdraw(env: Env) -> Result<i128, ErrorCode>;

    fn rebase(env: Env) -> Result<i128, ErrorCode>;

    fn collect_liquidity_fees(env: Env) -> Result<i128, ErrorCode>;

    // ################################################################
    //                             USER
    // ################################################################

    fn deposit(env: Env, sender: Address, amount: i128) -> Result<i128, ErrorCode>;

    fn redeem(env: Env, sender: Address, shares: i128) -> Result<i128, ErrorCode>;

    // ################################################################
    //                             TOKEN
    // ################################################################

    fn balance(env: Env, id: Address) -> Result<i128, ErrorCode>;

    fn total_supply(env: Env) -> i128;

    fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ErrorCode>;

    fn transfer_shares(env: Env, from: Address, to: Address, shares: i128) -> Result<(), ErrorCode>;

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128
    ) -> Result<(), ErrorCode>;

    fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32
    ) -> Result<(), ErrorCode>;

    fn allowance(env: Env, from: Address, spender: Address) -> i128;

    fn decimals(env: Env) -> u32;

    fn name(env: Env) -> String;

    fn symbol(env: Env) -> String;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Result<Config, ErrorCode>;

    fn query_admin(env: Env) -> Result<Address, ErrorCode>;

    fn query_state(env: Env) -> PoolStateResponse;

    fn query_unlock(env: Env, id: u64) -> Result<UnlockRequest, ErrorCode>;

    /// Pages through the unsettled queue from `start`, returning at most
    /// `limit` entries capped by the configured batch size.
    fn query_pending_unlocks(
        env: Env,
        start: u64,
        limit: u32
    ) -> Result<Vec<UnlockRequest>, ErrorCode>;

    /// The validator switch still being applied by `migrate_unlock`, if any.
    fn query_migration(env: Env) -> Option<UnlockMigration>;

    fn shares_of(env: Env, id: Address) -> i128;

    fn total_shares(env: Env) -> i128;

    fn total_pooled_value(env: Env) -> i128;

    fn current_principal(env: Env) -> i128;
}
