use liquid::{
    constants::MAX_BPS,
    error::LiquidResult,
    math::{ helpers::get_proportion, safe_math::SafeMath },
};
use soroban_sdk::{ log, Env };

use crate::{
    controller::adapter,
    events::LiquidStakingEvents,
    ledger,
    storage::{ get_config, get_state, save_state, Config },
};

/// Harvests rewards from the network into the pooled value.
///
/// The adapter call is consuming, so a reward is only ever reported once and
/// nothing is cached between invocations. A zero reward is a no-op apart from
/// the rebase timestamp. Returns the applied reward.
pub fn rebase(env: &Env) -> LiquidResult<i128> {
    let config = get_config(env)?;
    let mut state = get_state(env);
    let now = env.ledger().timestamp();

    let reward = adapter::claim_rewards(env, &config)?;

    state.last_rebase_at = now;
    state.accrued_rewards = reward;

    let mut fee_shares = 0;
    if reward > 0 {
        ledger::increase_pooled_value(env, reward)?;

        if config.auto_restake {
            state.current_principal = state.current_principal.safe_add(reward, env)?;
        } else {
            state.liquid_reserve = state.liquid_reserve.safe_add(reward, env)?;
        }

        fee_shares = mint_reward_fee(env, &config, reward)?;
    }

    save_state(env, &state);

    LiquidStakingEvents::rebase(env, reward, fee_shares, ledger::total_supply(env), now);

    Ok(reward)
}

/// Pays the protocol fee on `reward` by minting dilutive shares to the
/// treasury. The pool value is unchanged.
fn mint_reward_fee(env: &Env, config: &Config, reward: i128) -> LiquidResult<i128> {
    if config.reward_fee_bps == 0 {
        return Ok(0);
    }

    let fee = get_proportion(env, reward, i128::from(config.reward_fee_bps), i128::from(MAX_BPS))?;
    if fee == 0 {
        return Ok(0);
    }

    let shares = ledger::mint_shares_for_value(env, &config.treasury, fee)?;
    log!(env, "Liquid Staking: reward fee minted", fee, shares);

    Ok(shares)
}
