use liquid::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::Env;

use super::setup::{ deploy_pool, ONE_DAY };

#[test]
fn zero_reward_only_moves_timestamp() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    let user = t.new_depositor(100);

    t.set_time(ONE_DAY);
    assert_eq!(t.pool.rebase(), 0);

    let state = t.pool.query_state();
    assert_eq!(state.last_rebase_at, ONE_DAY);
    assert_eq!(state.accrued_rewards, 0);
    assert_eq!(state.total_pooled_value, 100);
    assert_eq!(t.pool.balance(&user), 100);
}

#[test]
fn compounded_reward_raises_principal() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    let alice = t.new_depositor(100);
    let bob = t.new_depositor(100);

    t.accrue_rewards(100);
    t.set_time(ONE_DAY);
    assert_eq!(t.pool.rebase(), 100);

    let state = t.pool.query_state();
    assert_eq!(state.current_principal, 300);
    assert_eq!(state.liquid_reserve, 0);
    assert_eq!(state.accrued_rewards, 100);
    assert_eq!(t.pool.balance(&alice), 150);
    assert_eq!(t.pool.balance(&bob), 150);
    assert_eq!(t.pool.shares_of(&alice), 100);
    t.assert_accounting_identity();
}

#[test]
fn repeated_rebase_does_not_double_count() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    t.new_depositor(100);

    t.accrue_rewards(50);
    assert_eq!(t.pool.rebase(), 50);
    assert_eq!(t.pool.rebase(), 0);

    let state = t.pool.query_state();
    assert_eq!(state.total_pooled_value, 150);
    assert_eq!(state.accrued_rewards, 0);
    t.assert_accounting_identity();
}

#[test]
fn paid_out_reward_lands_in_reserve() {
    let env = Env::default();
    let t = deploy_pool(&env, false);
    let user = t.new_depositor(100);

    t.accrue_rewards(50);
    assert_eq!(t.pool.rebase(), 50);

    let state = t.pool.query_state();
    assert_eq!(state.current_principal, 100);
    assert_eq!(state.liquid_reserve, 50);
    assert_eq!(state.total_pooled_value, 150);
    assert_eq!(t.token.balance(&t.pool.address), 50);
    assert_eq!(t.pool.balance(&user), 150);
    t.assert_accounting_identity();
}

#[test]
fn reward_fee_is_minted_to_treasury() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    t.pool.update_config(&None, &None, &None, &Some(1_000));
    let user = t.new_depositor(1_000);

    t.accrue_rewards(100);
    t.pool.rebase();

    // A 10% fee on 100 is worth 10: 10 * 1_000 / 1_090 shares
    assert_eq!(t.pool.shares_of(&t.treasury), 9);
    assert_eq!(t.pool.balance(&t.treasury), 9);
    assert_eq!(t.pool.balance(&user), 1_090);
    assert_eq!(t.pool.total_pooled_value(), 1_100);
    t.assert_accounting_identity();
}

#[test]
fn misreported_reward_is_rejected() {
    let env = Env::default();
    let t = deploy_pool(&env, false);
    t.new_depositor(100);

    t.accrue_rewards(50);
    t.adapter.set_misreport(&true);

    let before = t.pool.query_state();
    assert_eq!(t.pool.try_rebase(), Err(Ok(ErrorCode::ExternalProtocolError)));
    assert_eq!(t.pool.query_state(), before);

    t.adapter.set_misreport(&false);
    assert_eq!(t.pool.rebase(), 50);
}

#[test]
fn failing_network_leaves_state_untouched() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    t.new_depositor(100);

    t.accrue_rewards(50);
    t.adapter.set_failing(&true);

    let before = t.pool.query_state();
    assert_eq!(t.pool.try_rebase(), Err(Ok(ErrorCode::ExternalProtocolError)));
    assert_eq!(t.pool.query_state(), before);
}
