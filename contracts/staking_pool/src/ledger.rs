//! Elastic share ledger.
//!
//! Holders own shares; their token balance is the projection
//! `shares * total_pooled_value / total_shares`. Growing the pooled value
//! raises every balance at once without touching a single holder entry.

use liquid::{
    error::{ ErrorCode, LiquidResult },
    math::{ helpers::get_proportion, safe_math::SafeMath },
    validate,
};
use soroban_sdk::{ Address, Env };

use crate::storage::{ get_ledger_totals, read_shares, save_ledger_totals, write_shares, LedgerTotals };

pub fn shares_of(env: &Env, holder: &Address) -> i128 {
    read_shares(env, holder)
}

pub fn total_shares(env: &Env) -> i128 {
    get_ledger_totals(env).total_shares
}

/// Total token supply, identical to the pooled value.
pub fn total_supply(env: &Env) -> i128 {
    get_ledger_totals(env).total_pooled_value
}

pub fn balance_of(env: &Env, holder: &Address) -> LiquidResult<i128> {
    value_for_shares(env, &get_ledger_totals(env), read_shares(env, holder))
}

pub fn value_for_shares(env: &Env, totals: &LedgerTotals, shares: i128) -> LiquidResult<i128> {
    if totals.total_shares == 0 {
        return Ok(0);
    }
    get_proportion(env, shares, totals.total_pooled_value, totals.total_shares)
}

pub fn shares_for_value(env: &Env, totals: &LedgerTotals, value: i128) -> LiquidResult<i128> {
    if totals.total_shares == 0 {
        return Ok(value);
    }
    validate!(
        env,
        totals.total_pooled_value > 0,
        ErrorCode::InsufficientPool,
        "pool value is zero while shares are outstanding"
    )?;
    get_proportion(env, value, totals.total_shares, totals.total_pooled_value)
}

/// Issues shares for a deposit of `deposit_amount` and grows the pool by it.
///
/// The first deposit bootstraps the exchange rate at 1:1.
pub fn mint(env: &Env, holder: &Address, deposit_amount: i128) -> LiquidResult<i128> {
    validate!(env, deposit_amount > 0, ErrorCode::InvalidAmount)?;

    let mut totals = get_ledger_totals(env);
    let new_shares = shares_for_value(env, &totals, deposit_amount)?;

    validate!(
        env,
        new_shares > 0,
        ErrorCode::DepositTooSmall,
        "deposit would not receive any shares",
        deposit_amount
    )?;

    let holder_shares = read_shares(env, holder).safe_add(new_shares, env)?;
    totals.total_shares = totals.total_shares.safe_add(new_shares, env)?;
    totals.total_pooled_value = totals.total_pooled_value.safe_add(deposit_amount, env)?;

    write_shares(env, holder, holder_shares);
    save_ledger_totals(env, &totals);

    Ok(new_shares)
}

/// Mints shares worth `value` out of the existing pool, diluting every other
/// holder. The pooled value must already include `value`.
pub fn mint_shares_for_value(env: &Env, holder: &Address, value: i128) -> LiquidResult<i128> {
    validate!(env, value >= 0, ErrorCode::InvalidAmount)?;

    let mut totals = get_ledger_totals(env);
    if value == 0 || totals.total_shares == 0 {
        return Ok(0);
    }

    let remaining_value = totals.total_pooled_value.safe_sub(value, env)?;
    validate!(
        env,
        remaining_value > 0,
        ErrorCode::InsufficientPool,
        "fee value must be below the pooled value",
        value,
        totals.total_pooled_value
    )?;

    let new_shares = get_proportion(env, value, totals.total_shares, remaining_value)?;
    if new_shares == 0 {
        return Ok(0);
    }

    let holder_shares = read_shares(env, holder).safe_add(new_shares, env)?;
    totals.total_shares = totals.total_shares.safe_add(new_shares, env)?;

    write_shares(env, holder, holder_shares);
    save_ledger_totals(env, &totals);

    Ok(new_shares)
}

/// Burns `share_amount` shares of `holder` and removes their value from the
/// pool. Returns the value, computed before the mutation.
pub fn burn(env: &Env, holder: &Address, share_amount: i128) -> LiquidResult<i128> {
    validate!(env, share_amount > 0, ErrorCode::InvalidAmount)?;

    let holder_shares = read_shares(env, holder);
    validate!(
        env,
        share_amount <= holder_shares,
        ErrorCode::InsufficientShares,
        "burn exceeds holder shares",
        share_amount,
        holder_shares
    )?;

    let mut totals = get_ledger_totals(env);
    let value = value_for_shares(env, &totals, share_amount)?;

    totals.total_shares = totals.total_shares.safe_sub(share_amount, env)?;
    totals.total_pooled_value = totals.total_pooled_value.safe_sub(value, env)?;

    write_shares(env, holder, holder_shares.safe_sub(share_amount, env)?);
    save_ledger_totals(env, &totals);

    Ok(value)
}

/// Rebase primitive: grows the pool without touching shares.
pub(crate) fn increase_pooled_value(env: &Env, delta: i128) -> LiquidResult {
    validate!(env, delta >= 0, ErrorCode::InvalidAmount)?;

    let mut totals = get_ledger_totals(env);
    totals.total_pooled_value = totals.total_pooled_value.safe_add(delta, env)?;
    save_ledger_totals(env, &totals);

    Ok(())
}

pub(crate) fn decrease_pooled_value(env: &Env, delta: i128) -> LiquidResult {
    validate!(env, delta >= 0, ErrorCode::InvalidAmount)?;

    let mut totals = get_ledger_totals(env);
    validate!(
        env,
        delta <= totals.total_pooled_value,
        ErrorCode::InsufficientPool,
        "decrease exceeds pooled value",
        delta,
        totals.total_pooled_value
    )?;
    totals.total_pooled_value -= delta;
    save_ledger_totals(env, &totals);

    Ok(())
}

pub fn transfer_shares(env: &Env, from: &Address, to: &Address, shares: i128) -> LiquidResult {
    validate!(env, shares >= 0, ErrorCode::InvalidAmount)?;

    let from_shares = read_shares(env, from);
    validate!(
        env,
        shares <= from_shares,
        ErrorCode::InsufficientShares,
        "transfer exceeds holder shares",
        shares,
        from_shares
    )?;

    if shares == 0 || from == to {
        return Ok(());
    }

    let to_shares = read_shares(env, to).safe_add(shares, env)?;
    write_shares(env, from, from_shares - shares);
    write_shares(env, to, to_shares);

    Ok(())
}
