use soroban_sdk::{ Address, Env, Symbol };

use crate::storage::UnlockRequest;

pub struct LiquidStakingEvents {}

impl LiquidStakingEvents {
    /// Emitted once when the pool is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[underlying: Address, adapter: Address, validator: Address]`
    pub fn initialize(
        env: &Env,
        admin: Address,
        underlying: Address,
        adapter: Address,
        validator: Address
    ) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (underlying, adapter, validator));
    }

    /// Emitted when the admin changes tunable parameters
    ///
    /// - topics - `["update_config", admin: Address]`
    /// - data - `[unbonding_period: u64, max_batch_size: u32, reward_fee_bps: u32]`
    pub fn update_config(
        env: &Env,
        admin: Address,
        unbonding_period: u64,
        max_batch_size: u32,
        reward_fee_bps: u32
    ) {
        let topics = (Symbol::new(env, "update_config"), admin);
        env.events().publish(topics, (unbonding_period, max_batch_size, reward_fee_bps));
    }

    /// Emitted when underlying is deposited and staked
    ///
    /// - topics - `["deposit", sender: Address]`
    /// - data - `[amount: i128, shares: i128]`
    pub fn deposit(env: &Env, sender: Address, amount: i128, shares: i128) {
        let topics = (Symbol::new(env, "deposit"), sender);
        env.events().publish(topics, (amount, shares));
    }

    /// Emitted when shares are redeemed from the liquid reserve
    ///
    /// - topics - `["redeem", sender: Address]`
    /// - data - `[shares: i128, amount: i128]`
    pub fn redeem(env: &Env, sender: Address, shares: i128, amount: i128) {
        let topics = (Symbol::new(env, "redeem"), sender);
        env.events().publish(topics, (shares, amount));
    }

    /// - topics - `["request_unlock", id: u64]`
    /// - data - `[amount: i128, matures_at: u64, target: Address]`
    pub fn request_unlock(env: &Env, request: &UnlockRequest) {
        let topics = (Symbol::new(env, "request_unlock"), request.id);
        env.events().publish(topics, (request.amount, request.matures_at, request.target.clone()));
    }

    /// - topics - `["cancel_unlock", id: u64]`
    /// - data - `amount: i128`
    pub fn cancel_unlock(env: &Env, id: u64, amount: i128) {
        let topics = (Symbol::new(env, "cancel_unlock"), id);
        env.events().publish(topics, amount);
    }

    /// Emitted once per `process_unstake` that handed entries to the adapter
    ///
    /// - topics - `["process_unstake"]`
    /// - data - `[count: u32, amount: i128]`
    pub fn process_unstake(env: &Env, count: u32, amount: i128) {
        let topics = (Symbol::new(env, "process_unstake"),);
        env.events().publish(topics, (count, amount));
    }

    /// Emitted for every unlock request settled by `process_withdraw`
    ///
    /// - topics - `["unlock_settled", id: u64]`
    /// - data - `request: UnlockRequest`
    pub fn unlock_settled(env: &Env, request: &UnlockRequest) {
        let topics = (Symbol::new(env, "unlock_settled"), request.id);
        env.events().publish(topics, request.clone());
    }

    /// - topics - `["process_withdraw"]`
    /// - data - `[count: u32, expected: i128, settled: i128]`
    pub fn process_withdraw(env: &Env, count: u32, expected: i128, settled: i128) {
        let topics = (Symbol::new(env, "process_withdraw"),);
        env.events().publish(topics, (count, expected, settled));
    }

    /// - topics - `["rebase"]`
    /// - data - `[reward: i128, fee_shares: i128, total_pooled_value: i128, ts: u64]`
    pub fn rebase(env: &Env, reward: i128, fee_shares: i128, total_pooled_value: i128, ts: u64) {
        let topics = (Symbol::new(env, "rebase"),);
        env.events().publish(topics, (reward, fee_shares, total_pooled_value, ts));
    }

    /// - topics - `["migrate_unlock", new_target: Address]`
    /// - data - `[previous_target: Address, count: u32, complete: bool]`
    pub fn migrate_unlock(
        env: &Env,
        previous_target: Address,
        new_target: Address,
        count: u32,
        complete: bool
    ) {
        let topics = (Symbol::new(env, "migrate_unlock"), new_target);
        env.events().publish(topics, (previous_target, count, complete));
    }

    /// - topics - `["collect_liquidity_fees"]`
    /// - data - `amount: i128`
    pub fn collect_liquidity_fees(env: &Env, amount: i128) {
        let topics = (Symbol::new(env, "collect_liquidity_fees"),);
        env.events().publish(topics, amount);
    }

    /// - topics - `["restake"]`
    /// - data - `amount: i128`
    pub fn restake(env: &Env, amount: i128) {
        let topics = (Symbol::new(env, "restake"),);
        env.events().publish(topics, amount);
    }
}
