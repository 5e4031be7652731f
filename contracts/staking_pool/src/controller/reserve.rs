use liquid::{
    error::{ ErrorCode, LiquidResult },
    math::safe_math::SafeMath,
    safe_decrement,
    validate,
    validate_positive_amounts,
};
use soroban_sdk::{ token, Address, Env };
use soroban_token_sdk::TokenUtils;

use crate::{
    controller::adapter,
    events::LiquidStakingEvents,
    ledger,
    storage::{ get_config, get_state, save_state, utils::check_not_paused, Operation },
};

/// Takes `amount` of underlying from `sender`, stakes it and mints shares.
pub fn deposit(env: &Env, sender: &Address, amount: i128) -> LiquidResult<i128> {
    validate_positive_amounts!(env, amount)?;

    let config = get_config(env)?;
    check_not_paused(env, &config, Operation::Deposit)?;

    token::TokenClient
        ::new(env, &config.underlying)
        .transfer(sender, &env.current_contract_address(), &amount);

    let shares = ledger::mint(env, sender, amount)?;
    adapter::stake(env, &config, amount)?;

    let mut state = get_state(env);
    state.current_principal = state.current_principal.safe_add(amount, env)?;
    save_state(env, &state);

    TokenUtils::new(env).events().mint(env.current_contract_address(), sender.clone(), amount);
    LiquidStakingEvents::deposit(env, sender.clone(), amount, shares);

    Ok(shares)
}

/// Burns `shares` of `sender` and pays their value out of the liquid reserve.
pub fn redeem(env: &Env, sender: &Address, shares: i128) -> LiquidResult<i128> {
    validate_positive_amounts!(env, shares)?;

    let config = get_config(env)?;
    check_not_paused(env, &config, Operation::Redeem)?;

    let mut state = get_state(env);
    let value = ledger::burn(env, sender, shares)?;

    validate!(
        env,
        value <= state.liquid_reserve,
        ErrorCode::InsufficientLiquidity,
        "redeem exceeds liquid reserve",
        value,
        state.liquid_reserve
    )?;
    state.liquid_reserve -= value;
    save_state(env, &state);

    if value > 0 {
        token::TokenClient
            ::new(env, &config.underlying)
            .transfer(&env.current_contract_address(), sender, &value);
    }

    TokenUtils::new(env).events().burn(sender.clone(), value);
    LiquidStakingEvents::redeem(env, sender.clone(), shares, value);

    Ok(value)
}

/// Stakes idle reserve again.
pub fn restake(env: &Env, amount: i128) -> LiquidResult {
    validate_positive_amounts!(env, amount)?;

    let config = get_config(env)?;
    let mut state = get_state(env);

    validate!(
        env,
        amount <= state.liquid_reserve,
        ErrorCode::InsufficientLiquidity,
        "restake exceeds liquid reserve",
        amount,
        state.liquid_reserve
    )?;

    adapter::stake(env, &config, amount)?;

    safe_decrement!(env, state.liquid_reserve, amount);
    state.current_principal = state.current_principal.safe_add(amount, env)?;
    save_state(env, &state);

    LiquidStakingEvents::restake(env, amount);

    Ok(())
}

/// Sweeps underlying that reached the pool outside of the tracked flows, such
/// as liquidity fee income, into the pooled value. Returns the swept amount.
pub fn collect_liquidity_fees(env: &Env) -> LiquidResult<i128> {
    let config = get_config(env)?;
    let mut state = get_state(env);

    let balance = token::TokenClient
        ::new(env, &config.underlying)
        .balance(&env.current_contract_address());
    let surplus = balance.safe_sub(state.liquid_reserve, env)?;

    if surplus <= 0 {
        return Ok(0);
    }

    ledger::increase_pooled_value(env, surplus)?;
    state.liquid_reserve = state.liquid_reserve.safe_add(surplus, env)?;
    save_state(env, &state);

    LiquidStakingEvents::collect_liquidity_fees(env, surplus);

    Ok(surplus)
}
