use liquid::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::{ Address as _, Ledger }, vec, Address, Env };

use super::setup::{ deploy_pool, TestPool, SEVEN_DAYS };
use crate::storage::Operation;

/// Two holders of 100 shares each on a pool worth 300.
fn grown_pool<'a>(env: &Env) -> (TestPool<'a>, Address, Address) {
    let t = deploy_pool(env, true);
    let alice = t.new_depositor(100);
    let bob = t.new_depositor(100);
    t.accrue_rewards(100);
    t.pool.rebase();
    (t, alice, bob)
}

/// A pool of 100 with 40 settled back into the reserve.
fn pool_with_reserve<'a>(env: &Env) -> (TestPool<'a>, Address) {
    let t = deploy_pool(env, true);
    let user = t.new_depositor(100);
    t.pool.request_unlock(&40);
    t.pool.process_unstake();
    t.set_time(SEVEN_DAYS);
    t.pool.process_withdraw();
    (t, user)
}

#[test]
fn deposit_stakes_with_the_network() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    let user = Address::generate(&env);

    assert_eq!(t.deposit(&user, 1_000), 1_000);
    assert_eq!(t.pool.balance(&user), 1_000);
    assert_eq!(t.token.balance(&user), 0);
    assert_eq!(t.token.balance(&t.adapter.address), 1_000);
    assert_eq!(t.adapter.staked(), 1_000);
    assert_eq!(t.pool.current_principal(), 1_000);
    assert_eq!(t.pool.try_deposit(&user, &0), Err(Ok(ErrorCode::InvalidAmount)));
    t.assert_accounting_identity();
}

#[test]
fn failed_stake_reverts_deposit() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    let user = Address::generate(&env);
    t.token_admin.mint(&user, &50);

    t.adapter.set_failing(&true);
    assert_eq!(t.pool.try_deposit(&user, &50), Err(Ok(ErrorCode::ExternalProtocolError)));
    assert_eq!(t.token.balance(&user), 50);
    assert_eq!(t.pool.shares_of(&user), 0);
    assert_eq!(t.pool.total_pooled_value(), 0);
}

#[test]
fn transfer_moves_shares_not_value() {
    let env = Env::default();
    let (t, alice, bob) = grown_pool(&env);

    // 30 * 200 / 300
    t.pool.transfer(&alice, &bob, &30);
    assert_eq!(t.pool.shares_of(&alice), 80);
    assert_eq!(t.pool.shares_of(&bob), 120);
    assert_eq!(t.pool.balance(&alice), 120);
    assert_eq!(t.pool.balance(&bob), 180);
    assert_eq!(t.pool.total_pooled_value(), 300);

    let carol = Address::generate(&env);
    t.pool.transfer_shares(&bob, &carol, &10);
    assert_eq!(t.pool.balance(&carol), 15);
    assert_eq!(
        t.pool.try_transfer_shares(&carol, &bob, &11),
        Err(Ok(ErrorCode::InsufficientShares))
    );
    assert_eq!(t.pool.try_transfer(&alice, &bob, &-1), Err(Ok(ErrorCode::InvalidAmount)));
    assert_eq!(t.pool.try_transfer_shares(&alice, &bob, &-1), Err(Ok(ErrorCode::InvalidAmount)));
    assert_eq!(t.pool.total_shares(), 200);
}

#[test]
fn transfer_worth_less_than_a_share_is_rejected() {
    let env = Env::default();
    let (t, alice, _) = grown_pool(&env);
    let spender = Address::generate(&env);
    let carol = Address::generate(&env);

    // 1 * 200 / 300 rounds to zero shares
    assert_eq!(t.pool.try_transfer(&alice, &carol, &1), Err(Ok(ErrorCode::InvalidAmount)));
    assert_eq!(t.pool.balance(&alice), 150);

    t.pool.approve(&alice, &spender, &50, &200);
    assert_eq!(
        t.pool.try_transfer_from(&spender, &alice, &carol, &1),
        Err(Ok(ErrorCode::InvalidAmount))
    );
    assert_eq!(t.pool.allowance(&alice, &spender), 50);

    // 2 buys a single share, worth 1
    t.pool.transfer(&alice, &carol, &2);
    assert_eq!(t.pool.shares_of(&carol), 1);
    assert_eq!(t.pool.balance(&carol), 1);
    assert_eq!(t.pool.shares_of(&alice), 99);

    t.pool.transfer(&alice, &carol, &0);
    assert_eq!(t.pool.shares_of(&carol), 1);
}

#[test]
fn transfer_from_spends_allowance() {
    let env = Env::default();
    let (t, alice, _) = grown_pool(&env);
    let spender = Address::generate(&env);
    let carol = Address::generate(&env);

    env.ledger().with_mut(|li| {
        li.sequence_number = 100;
    });

    t.pool.approve(&alice, &spender, &50, &200);
    assert_eq!(t.pool.allowance(&alice, &spender), 50);

    t.pool.transfer_from(&spender, &alice, &carol, &30);
    assert_eq!(t.pool.allowance(&alice, &spender), 20);
    assert_eq!(t.pool.balance(&carol), 30);
    assert_eq!(
        t.pool.try_transfer_from(&spender, &alice, &carol, &30),
        Err(Ok(ErrorCode::InsufficientAllowance))
    );
}

#[test]
fn redeem_is_limited_by_reserve() {
    let env = Env::default();
    let (t, user) = pool_with_reserve(&env);

    assert_eq!(t.pool.try_redeem(&user, &50), Err(Ok(ErrorCode::InsufficientLiquidity)));
    assert_eq!(t.pool.try_redeem(&user, &101), Err(Ok(ErrorCode::InsufficientShares)));

    assert_eq!(t.pool.redeem(&user, &40), 40);
    assert_eq!(t.token.balance(&user), 40);
    assert_eq!(t.pool.shares_of(&user), 60);

    let state = t.pool.query_state();
    assert_eq!(state.total_pooled_value, 60);
    assert_eq!(state.liquid_reserve, 0);
    assert_eq!(state.current_principal, 60);
    t.assert_accounting_identity();
}

#[test]
fn paused_redeem_is_rejected() {
    let env = Env::default();
    let (t, user) = pool_with_reserve(&env);

    t.pool.set_paused_operations(&vec![&env, Operation::Redeem]);
    assert_eq!(t.pool.try_redeem(&user, &10), Err(Ok(ErrorCode::OperationPaused)));
}

#[test]
fn restake_moves_reserve_back_to_principal() {
    let env = Env::default();
    let (t, _) = pool_with_reserve(&env);

    t.pool.restake(&30);

    let state = t.pool.query_state();
    assert_eq!(state.liquid_reserve, 10);
    assert_eq!(state.current_principal, 90);
    assert_eq!(t.adapter.staked(), 90);
    assert_eq!(t.pool.try_restake(&20), Err(Ok(ErrorCode::InsufficientLiquidity)));
    t.assert_accounting_identity();
}

#[test]
fn collect_liquidity_fees_sweeps_surplus() {
    let env = Env::default();
    let t = deploy_pool(&env, true);
    let user = t.new_depositor(100);

    t.token_admin.mint(&t.pool.address, &25);
    assert_eq!(t.pool.collect_liquidity_fees(), 25);
    assert_eq!(t.pool.collect_liquidity_fees(), 0);

    let state = t.pool.query_state();
    assert_eq!(state.liquid_reserve, 25);
    assert_eq!(state.total_pooled_value, 125);
    assert_eq!(t.pool.balance(&user), 125);
    t.assert_accounting_identity();
}
