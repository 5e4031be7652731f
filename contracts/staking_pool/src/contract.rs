use liquid::{
    constants::{ MAX_TOKEN_DECIMALS, MAX_UNBONDING_PERIOD, MIN_UNBONDING_PERIOD },
    error::{ ErrorCode, LiquidResult },
    validate,
    validate_bps,
};
use soroban_sdk::{ contract, contractimpl, contractmeta, log, Address, Env, String, Vec };
use soroban_token_sdk::{ metadata::TokenMetadata, TokenUtils };

use crate::{
    allowance::{ read_allowance, spend_allowance, write_allowance },
    controller,
    events::LiquidStakingEvents,
    interface::LiquidStakingTrait,
    ledger,
    metadata::{ read_decimal, read_name, read_symbol, write_metadata },
    msg::PoolStateResponse,
    storage::{
        get_config,
        get_cursors,
        get_ledger_totals,
        get_migration,
        get_state,
        get_unlock,
        save_config,
        save_cursors,
        save_ledger_totals,
        save_state,
        utils::{
            bump_instance,
            check_not_paused,
            get_admin,
            is_initialized,
            require_admin,
            save_admin,
            set_initialized,
        },
        Config,
        LedgerTotals,
        Operation,
        PoolState,
        QueueCursors,
        UnlockMigration,
        UnlockRequest,
        UnlockStatus,
    },
};

contractmeta!(
    key = "Description",
    val = "Liquid staking pool issuing an elastic token backed by staked principal"
);

#[contract]
pub struct LiquidStaking;

fn validate_unbonding_period(env: &Env, unbonding_period: u64) -> LiquidResult {
    validate!(
        env,
        (MIN_UNBONDING_PERIOD..=MAX_UNBONDING_PERIOD).contains(&unbonding_period),
        ErrorCode::InvalidConfig,
        "unbonding period out of range",
        unbonding_period
    )
}

fn validate_max_batch_size(env: &Env, max_batch_size: u32) -> LiquidResult {
    validate!(env, max_batch_size > 0, ErrorCode::InvalidConfig, "max batch size must be positive")
}

/// Reports a matured unbonding as withdrawable until it is settled.
fn with_derived_status(env: &Env, mut request: UnlockRequest) -> UnlockRequest {
    if request.status == UnlockStatus::Unstaking && request.matures_at <= env.ledger().timestamp() {
        request.status = UnlockStatus::Withdrawable;
    }
    request
}

#[contractimpl]
impl LiquidStakingTrait for LiquidStaking {
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
    ) -> Result<(), ErrorCode> {
        if is_initialized(&env) {
            log!(&env, "Liquid Staking: Initialize: initializing contract twice is not allowed");
            return Err(ErrorCode::AlreadyInitialized);
        }

        validate_unbonding_period(&env, config.unbonding_period)?;
        validate_max_batch_size(&env, config.max_batch_size)?;
        validate_bps!(&env, config.reward_fee_bps)?;
        validate!(
            &env,
            decimal <= MAX_TOKEN_DECIMALS,
            ErrorCode::InvalidConfig,
            "decimal must not be greater than 18"
        )?;

        set_initialized(&env);
        save_admin(&env, &admin);
        save_config(&env, &config);
        save_ledger_totals(&env, &LedgerTotals::default());
        save_state(&env, &PoolState { last_rebase_at: env.ledger().timestamp(), ..Default::default() });
        save_cursors(&env, &QueueCursors::default());

        write_metadata(&env, TokenMetadata { decimal, name, symbol });

        LiquidStakingEvents::initialize(
            &env,
            admin,
            config.underlying,
            config.adapter,
            config.validator
        );

        Ok(())
    }

    fn update_config(
        env: Env,
        treasury: Option<Address>,
        batch_unstake: Option<bool>,
        max_batch_size: Option<u32>,
        reward_fee_bps: Option<u32>
    ) -> Result<(), ErrorCode> {
        let admin = require_admin(&env)?;
        bump_instance(&env);

        let mut config = get_config(&env)?;

        if let Some(treasury) = treasury {
            config.treasury = treasury;
        }
        if let Some(batch_unstake) = batch_unstake {
            config.batch_unstake = batch_unstake;
        }
        if let Some(max_batch_size) = max_batch_size {
            validate_max_batch_size(&env, max_batch_size)?;
            config.max_batch_size = max_batch_size;
        }
        if let Some(reward_fee_bps) = reward_fee_bps {
            validate_bps!(&env, reward_fee_bps)?;
            config.reward_fee_bps = reward_fee_bps;
        }

        save_config(&env, &config);

        LiquidStakingEvents::update_config(
            &env,
            admin,
            config.unbonding_period,
            config.max_batch_size,
            config.reward_fee_bps
        );

        Ok(())
    }

    fn set_paused_operations(env: Env, paused_operations: Vec<Operation>) -> Result<(), ErrorCode> {
        require_admin(&env)?;
        bump_instance(&env);

        let mut config = get_config(&env)?;
        config.paused_operations = paused_operations;
        save_config(&env, &config);

        Ok(())
    }

    fn request_unlock(env: Env, amount: i128) -> Result<u64, ErrorCode> {
        require_admin(&env)?;
        bump_instance(&env);

        controller::unlock::request_unlock(&env, amount)
    }

    fn cancel_unlock(env: Env, id: u64) -> Result<(), ErrorCode> {
        require_admin(&env)?;
        bump_instance(&env);

        controller::unlock::cancel_unlock(&env, id)
    }

    fn migrate_unlock(env: Env, new_target: Address) -> Result<u32, ErrorCode> {
        require_admin(&env)?;
        bump_instance(&env);

        controller::unlock::migrate_unlock(&env, new_target)
    }

    fn restake(env: Env, amount: i128) -> Result<(), ErrorCode> {
        require_admin(&env)?;
        bump_instance(&env);

        controller::reserve::restake(&env, amount)
    }

    // ################################################################
    //                             KEEPER
    // ################################################################

    fn process_unstake(env: Env) -> Result<u32, ErrorCode> {
        bump_instance(&env);
        controller::unlock::process_unstake(&env)
    }

    fn process_withdraw(env: Env) -> Result<i128, ErrorCode> {
        bump_instance(&env);
        controller::unlock::process_withdraw(&env)
    }

    fn rebase(env: Env) -> Result<i128, ErrorCode> {
        bump_instance(&env);
        controller::rewards::rebase(&env)
    }

    fn collect_liquidity_fees(env: Env) -> Result<i128, ErrorCode> {
        bump_instance(&env);
        controller::reserve::collect_liquidity_fees(&env)
    }

    // ################################################################
    //                             USER
    // ################################################################

    fn deposit(env: Env, sender: Address, amount: i128) -> Result<i128, ErrorCode> {
        sender.require_auth();
        bump_instance(&env);

        controller::reserve::deposit(&env, &sender, amount)
    }

    fn redeem(env: Env, sender: Address, shares: i128) -> Result<i128, ErrorCode> {
        sender.require_auth();
        bump_instance(&env);

        controller::reserve::redeem(&env, &sender, shares)
    }

    // ################################################################
    //                             TOKEN
    // ################################################################

    fn balance(env: Env, id: Address) -> Result<i128, ErrorCode> {
        bump_instance(&env);
        ledger::balance_of(&env, &id)
    }

    fn total_supply(env: Env) -> i128 {
        bump_instance(&env);
        ledger::total_supply(&env)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ErrorCode> {
        from.require_auth();
        bump_instance(&env);

        move_value(&env, &from, &to, amount)
    }

    fn transfer_shares(
        env: Env,
        from: Address,
        to: Address,
        shares: i128
    ) -> Result<(), ErrorCode> {
        from.require_auth();
        bump_instance(&env);

        let config = get_config(&env)?;
        check_not_paused(&env, &config, Operation::Transfer)?;
        validate!(&env, shares >= 0, ErrorCode::InvalidAmount)?;

        let value = ledger::value_for_shares(&env, &get_ledger_totals(&env), shares)?;
        ledger::transfer_shares(&env, &from, &to, shares)?;

        TokenUtils::new(&env).events().transfer(from, to, value);

        Ok(())
    }

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128
    ) -> Result<(), ErrorCode> {
        spender.require_auth();
        bump_instance(&env);

        validate!(&env, amount >= 0, ErrorCode::InvalidAmount)?;
        spend_allowance(&env, from.clone(), spender, amount)?;

        move_value(&env, &from, &to, amount)
    }

    fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32
    ) -> Result<(), ErrorCode> {
        from.require_auth();
        bump_instance(&env);

        validate!(&env, amount >= 0, ErrorCode::InvalidAmount)?;
        write_allowance(&env, from.clone(), spender.clone(), amount, expiration_ledger)?;

        TokenUtils::new(&env).events().approve(from, spender, amount, expiration_ledger);

        Ok(())
    }

    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        bump_instance(&env);
        read_allowance(&env, from, spender).amount
    }

    fn decimals(env: Env) -> u32 {
        read_decimal(&env)
    }

    fn name(env: Env) -> String {
        read_name(&env)
    }

    fn symbol(env: Env) -> String {
        read_symbol(&env)
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Result<Config, ErrorCode> {
        bump_instance(&env);
        get_config(&env)
    }

    fn query_admin(env: Env) -> Result<Address, ErrorCode> {
        bump_instance(&env);
        get_admin(&env)
    }

    fn query_state(env: Env) -> PoolStateResponse {
        bump_instance(&env);

        let totals = get_ledger_totals(&env);
        let state = get_state(&env);
        let cursors = get_cursors(&env);

        PoolStateResponse {
            total_pooled_value: totals.total_pooled_value,
            total_shares: totals.total_shares,
            current_principal: state.current_principal,
            total_unbonding: state.total_unbonding,
            liquid_reserve: state.liquid_reserve,
            last_rebase_at: state.last_rebase_at,
            accrued_rewards: state.accrued_rewards,
            pending_unlocks: cursors.next_id - cursors.withdraw_cursor,
        }
    }

    fn query_unlock(env: Env, id: u64) -> Result<UnlockRequest, ErrorCode> {
        bump_instance(&env);
        Ok(with_derived_status(&env, get_unlock(&env, id)?))
    }

    fn query_pending_unlocks(
        env: Env,
        start: u64,
        limit: u32
    ) -> Result<Vec<UnlockRequest>, ErrorCode> {
        bump_instance(&env);

        let config = get_config(&env)?;
        let cursors = get_cursors(&env);
        let limit = limit.min(config.max_batch_size);

        let mut pending = Vec::new(&env);
        let mut id = start.max(cursors.withdraw_cursor);
        while id < cursors.next_id && pending.len() < limit {
            pending.push_back(with_derived_status(&env, get_unlock(&env, id)?));
            id += 1;
        }

        Ok(pending)
    }

    fn query_migration(env: Env) -> Option<UnlockMigration> {
        bump_instance(&env);
        get_migration(&env)
    }

    fn shares_of(env: Env, id: Address) -> i128 {
        bump_instance(&env);
        ledger::shares_of(&env, &id)
    }

    fn total_shares(env: Env) -> i128 {
        bump_instance(&env);
        ledger::total_shares(&env)
    }

    fn total_pooled_value(env: Env) -> i128 {
        bump_instance(&env);
        ledger::total_supply(&env)
    }

    fn current_principal(env: Env) -> i128 {
        bump_instance(&env);
        get_state(&env).current_principal
    }
}

/// Moves `amount` of token value as the equivalent number of shares, rounded
/// down. The event carries the value the moved shares are worth.
fn move_value(env: &Env, from: &Address, to: &Address, amount: i128) -> LiquidResult {
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    let config = get_config(env)?;
    check_not_paused(env, &config, Operation::Transfer)?;

    let totals = get_ledger_totals(env);
    let shares = ledger::shares_for_value(env, &totals, amount)?;
    validate!(
        env,
        shares > 0 || amount == 0,
        ErrorCode::InvalidAmount,
        "transfer amount is worth less than one share",
        amount
    )?;

    let value = ledger::value_for_shares(env, &totals, shares)?;
    ledger::transfer_shares(env, from, to, shares)?;

    TokenUtils::new(env).events().transfer(from.clone(), to.clone(), value);

    Ok(())
}
