//! Calls into the network adapter.
//!
//! Every failure of the adapter, including a callee panic, surfaces as
//! `ExternalProtocolError`; the caller returns it and the host rolls back the
//! whole invocation.

use liquid::{
    adapter::StakingAdapterClient,
    error::{ ErrorCode, LiquidResult },
    math::safe_math::SafeMath,
    validate,
};
use soroban_sdk::{ log, token, Env };

use crate::storage::Config;

fn pool_balance(env: &Env, config: &Config) -> i128 {
    token::TokenClient::new(env, &config.underlying).balance(&env.current_contract_address())
}

/// Hands `amount` of the pool's underlying to the adapter and stakes it.
pub fn stake(env: &Env, config: &Config, amount: i128) -> LiquidResult {
    token::TokenClient
        ::new(env, &config.underlying)
        .transfer(&env.current_contract_address(), &config.adapter, &amount);

    match StakingAdapterClient::new(env, &config.adapter).try_stake(&amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "Liquid Staking: adapter stake failed", amount);
            Err(ErrorCode::ExternalProtocolError)
        }
    }
}

pub fn unstake(env: &Env, config: &Config, amount: i128) -> LiquidResult<u64> {
    match StakingAdapterClient::new(env, &config.adapter).try_unstake(&amount) {
        Ok(Ok(handle)) => Ok(handle),
        _ => {
            log!(env, "Liquid Staking: adapter unstake failed", amount);
            Err(ErrorCode::ExternalProtocolError)
        }
    }
}

/// Withdraws a matured unbonding and checks the pool received what the
/// adapter reports.
pub fn withdraw(env: &Env, config: &Config, handle: u64) -> LiquidResult<i128> {
    let balance_before = pool_balance(env, config);

    let settled = match StakingAdapterClient::new(env, &config.adapter).try_withdraw(&handle) {
        Ok(Ok(settled)) => settled,
        _ => {
            log!(env, "Liquid Staking: adapter withdraw failed", handle);
            return Err(ErrorCode::ExternalProtocolError);
        }
    };

    let received = pool_balance(env, config).safe_sub(balance_before, env)?;
    validate!(
        env,
        settled >= 0 && received == settled,
        ErrorCode::ExternalProtocolError,
        "adapter withdraw reported an amount it did not transfer",
        settled,
        received
    )?;

    Ok(settled)
}

/// Claims rewards. When the network pays rewards out instead of compounding
/// them, the pool balance must grow by exactly the reported reward.
pub fn claim_rewards(env: &Env, config: &Config) -> LiquidResult<i128> {
    let balance_before = pool_balance(env, config);

    let reward = match StakingAdapterClient::new(env, &config.adapter).try_pending_rewards() {
        Ok(Ok(reward)) => reward,
        _ => {
            log!(env, "Liquid Staking: adapter pending_rewards failed");
            return Err(ErrorCode::ExternalProtocolError);
        }
    };

    validate!(env, reward >= 0, ErrorCode::ExternalProtocolError, "negative reward", reward)?;

    if !config.auto_restake {
        let received = pool_balance(env, config).safe_sub(balance_before, env)?;
        validate!(
            env,
            received == reward,
            ErrorCode::ExternalProtocolError,
            "adapter reported a reward it did not transfer",
            reward,
            received
        )?;
    }

    Ok(reward)
}
