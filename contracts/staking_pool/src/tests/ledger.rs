use liquid::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::Address as _, Address, Env };

use super::setup::deploy_pool;
use crate::{ contract::LiquidStaking, ledger, storage::get_ledger_totals };

fn with_ledger<T>(f: impl FnOnce(&Env) -> T) -> T {
    let env = Env::default();
    let id = env.register(LiquidStaking, ());
    env.as_contract(&id, || f(&env))
}

#[test]
fn first_mint_bootstraps_one_to_one() {
    with_ledger(|env| {
        let holder = Address::generate(env);

        assert_eq!(ledger::mint(env, &holder, 1_000).unwrap(), 1_000);
        assert_eq!(ledger::shares_of(env, &holder), 1_000);
        assert_eq!(ledger::balance_of(env, &holder).unwrap(), 1_000);
        assert_eq!(ledger::total_supply(env), 1_000);
    });
}

#[test]
fn mint_preserves_existing_balances() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        let bob = Address::generate(env);

        ledger::mint(env, &alice, 100).unwrap();
        ledger::increase_pooled_value(env, 200).unwrap();
        assert_eq!(ledger::balance_of(env, &alice).unwrap(), 300);

        // 30 * 100 / 300
        assert_eq!(ledger::mint(env, &bob, 30).unwrap(), 10);
        assert_eq!(ledger::balance_of(env, &alice).unwrap(), 300);
        assert_eq!(ledger::balance_of(env, &bob).unwrap(), 30);
    });
}

#[test]
fn rebase_grows_balances_without_moving_shares() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        let bob = Address::generate(env);

        ledger::mint(env, &alice, 100).unwrap();
        ledger::mint(env, &bob, 100).unwrap();
        ledger::increase_pooled_value(env, 100).unwrap();

        assert_eq!(ledger::balance_of(env, &alice).unwrap(), 150);
        assert_eq!(ledger::balance_of(env, &bob).unwrap(), 150);
        assert_eq!(ledger::shares_of(env, &alice), 100);
        assert_eq!(ledger::total_shares(env), 200);
    });
}

#[test]
fn burn_values_shares_before_mutation() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        let bob = Address::generate(env);

        ledger::mint(env, &alice, 100).unwrap();
        ledger::mint(env, &bob, 50).unwrap();
        ledger::increase_pooled_value(env, 150).unwrap();

        assert_eq!(ledger::burn(env, &bob, 50).unwrap(), 100);

        let totals = get_ledger_totals(env);
        assert_eq!(totals.total_pooled_value, 200);
        assert_eq!(totals.total_shares, 100);
        assert_eq!(ledger::balance_of(env, &alice).unwrap(), 200);
        assert_eq!(ledger::balance_of(env, &bob).unwrap(), 0);
    });
}

#[test]
fn burn_more_than_owned_fails() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        ledger::mint(env, &alice, 100).unwrap();

        assert_eq!(ledger::burn(env, &alice, 101), Err(ErrorCode::InsufficientShares));
        assert_eq!(ledger::burn(env, &alice, 0), Err(ErrorCode::InvalidAmount));
    });
}

#[test]
fn zero_mint_fails() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        assert_eq!(ledger::mint(env, &alice, 0), Err(ErrorCode::InvalidAmount));
        assert_eq!(ledger::mint(env, &alice, -5), Err(ErrorCode::InvalidAmount));
    });
}

#[test]
fn written_off_pool_rejects_mint() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        let bob = Address::generate(env);

        ledger::mint(env, &alice, 100).unwrap();
        assert_eq!(ledger::decrease_pooled_value(env, 101), Err(ErrorCode::InsufficientPool));

        ledger::decrease_pooled_value(env, 100).unwrap();
        assert_eq!(ledger::balance_of(env, &alice).unwrap(), 0);
        assert_eq!(ledger::mint(env, &bob, 10), Err(ErrorCode::InsufficientPool));
    });
}

#[test]
fn fee_mint_dilutes_holders() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        let treasury = Address::generate(env);

        ledger::mint(env, &alice, 1_000).unwrap();
        ledger::increase_pooled_value(env, 100).unwrap();

        // 10 * 1_000 / 1_090
        assert_eq!(ledger::mint_shares_for_value(env, &treasury, 10).unwrap(), 9);
        assert_eq!(ledger::balance_of(env, &treasury).unwrap(), 9);
        assert_eq!(ledger::balance_of(env, &alice).unwrap(), 1_090);
        assert_eq!(ledger::total_supply(env), 1_100);
    });
}

#[test]
fn share_transfers_keep_totals() {
    with_ledger(|env| {
        let alice = Address::generate(env);
        let bob = Address::generate(env);

        ledger::mint(env, &alice, 100).unwrap();
        ledger::transfer_shares(env, &alice, &bob, 40).unwrap();

        assert_eq!(ledger::shares_of(env, &alice), 60);
        assert_eq!(ledger::shares_of(env, &bob), 40);
        assert_eq!(ledger::total_shares(env), 100);
        assert_eq!(
            ledger::transfer_shares(env, &alice, &bob, 61),
            Err(ErrorCode::InsufficientShares)
        );
    });
}

#[test]
fn balances_never_exceed_pooled_value() {
    let env = Env::default();
    let t = deploy_pool(&env, true);

    let holders = [t.new_depositor(333), t.new_depositor(1_000), t.new_depositor(7)];
    t.accrue_rewards(101);
    t.pool.rebase();
    let late = t.new_depositor(50);

    let mut shares = 0;
    let mut balances = 0;
    for holder in holders.iter().chain([late].iter()) {
        shares += t.pool.shares_of(holder);
        balances += t.pool.balance(holder);
    }

    assert_eq!(shares, t.pool.total_shares());
    assert!(balances <= t.pool.total_pooled_value());
    t.assert_accounting_identity();
}

#[test]
fn tiny_deposit_after_growth_is_rejected() {
    let env = Env::default();
    let t = deploy_pool(&env, true);

    t.new_depositor(100);
    t.accrue_rewards(200);
    t.pool.rebase();

    let user = Address::generate(&env);
    t.token_admin.mint(&user, &2);
    // 2 * 100 / 300 rounds to zero shares
    assert_eq!(t.pool.try_deposit(&user, &2), Err(Ok(ErrorCode::DepositTooSmall)));
    assert_eq!(t.token.balance(&user), 2);
}
