use liquid::{
    error::{ ErrorCode, LiquidResult },
    math::{ helpers::get_proportion, safe_math::SafeMath },
    safe_increment,
    validate,
    validate_positive_amounts,
};
use soroban_sdk::{ log, Address, Env, Vec };

use crate::{
    controller::adapter,
    events::LiquidStakingEvents,
    ledger,
    storage::{
        get_config,
        get_cursors,
        get_migration,
        get_state,
        get_unlock,
        remove_migration,
        remove_unlock,
        save_config,
        save_cursors,
        save_migration,
        save_state,
        save_unlock,
        UnlockMigration,
        UnlockRequest,
        UnlockStatus,
    },
};

/// Moves `amount` of principal into the unbonding queue.
///
/// The value stays in the pool: only its custody state changes.
pub fn request_unlock(env: &Env, amount: i128) -> LiquidResult<u64> {
    validate_positive_amounts!(env, amount)?;

    let config = get_config(env)?;
    let mut state = get_state(env);
    let mut cursors = get_cursors(env);

    validate!(
        env,
        amount <= state.current_principal,
        ErrorCode::InsufficientPrincipal,
        "unlock exceeds current principal",
        amount,
        state.current_principal
    )?;

    let now = env.ledger().timestamp();
    let request = UnlockRequest {
        id: cursors.next_id,
        amount,
        requested_at: now,
        matures_at: now.safe_add(config.unbonding_period, env)?,
        status: UnlockStatus::Requested,
        target: config.validator,
        handle: 0,
        settled: 0,
    };

    state.current_principal -= amount;
    state.total_unbonding = state.total_unbonding.safe_add(amount, env)?;
    cursors.next_id = cursors.next_id.safe_add(1, env)?;

    save_unlock(env, &request);
    save_cursors(env, &cursors);
    save_state(env, &state);

    LiquidStakingEvents::request_unlock(env, &request);

    Ok(request.id)
}

/// Withdraws a request that was not yet handed to the adapter.
pub fn cancel_unlock(env: &Env, id: u64) -> LiquidResult {
    let mut request = get_unlock(env, id)?;

    validate!(
        env,
        request.status == UnlockStatus::Requested,
        ErrorCode::InvalidState,
        "only requested unlocks can be cancelled",
        id
    )?;

    let mut state = get_state(env);
    state.current_principal = state.current_principal.safe_add(request.amount, env)?;
    state.total_unbonding = state.total_unbonding.safe_sub(request.amount, env)?;

    request.status = UnlockStatus::Cancelled;

    save_unlock(env, &request);
    save_state(env, &state);

    LiquidStakingEvents::cancel_unlock(env, id, request.amount);

    Ok(())
}

/// Hands requested entries to the adapter in request order.
///
/// Returns the number of entries that started unstaking. Without requested
/// entries this is a no-op.
pub fn process_unstake(env: &Env) -> LiquidResult<u32> {
    let config = get_config(env)?;
    let mut cursors = get_cursors(env);

    let mut batch: Vec<UnlockRequest> = Vec::new(env);
    let mut batch_amount: i128 = 0;
    let mut scanned: u32 = 0;
    let mut id = cursors.unstake_cursor;

    while id < cursors.next_id && scanned < config.max_batch_size {
        let request = get_unlock(env, id)?;
        if request.status == UnlockStatus::Requested {
            batch_amount = batch_amount.safe_add(request.amount, env)?;
            batch.push_back(request);
        }
        id += 1;
        scanned += 1;
    }

    if id == cursors.unstake_cursor {
        return Ok(0);
    }
    cursors.unstake_cursor = id;
    save_cursors(env, &cursors);

    if batch.is_empty() {
        return Ok(0);
    }

    if config.batch_unstake {
        let handle = adapter::unstake(env, &config, batch_amount)?;
        for mut request in batch.iter() {
            request.status = UnlockStatus::Unstaking;
            request.handle = handle;
            save_unlock(env, &request);
        }
    } else {
        for mut request in batch.iter() {
            request.handle = adapter::unstake(env, &config, request.amount)?;
            request.status = UnlockStatus::Unstaking;
            save_unlock(env, &request);
        }
    }

    let count = batch.len();
    LiquidStakingEvents::process_unstake(env, count, batch_amount);

    Ok(count)
}

/// Settles matured unbondings in request order.
///
/// Entries sharing an adapter handle settle together once all of them are
/// mature. The unbonding period is fixed at initialization, so maturities
/// follow request order and processing stops at the first immature entry.
/// Returns the settled amount.
pub fn process_withdraw(env: &Env) -> LiquidResult<i128> {
    let config = get_config(env)?;
    let mut cursors = get_cursors(env);
    let mut state = get_state(env);
    let now = env.ledger().timestamp();

    let max_entries = u64::from(config.max_batch_size);
    let mut processed: u64 = 0;
    let mut settled_entries: u32 = 0;
    let mut total_expected: i128 = 0;
    let mut total_settled: i128 = 0;
    let mut id = cursors.withdraw_cursor;

    while id < cursors.unstake_cursor && processed < max_entries {
        let head = get_unlock(env, id)?;

        if head.status == UnlockStatus::Cancelled {
            remove_unlock(env, id);
            id += 1;
            processed += 1;
            continue;
        }

        validate!(
            env,
            head.status == UnlockStatus::Unstaking,
            ErrorCode::InvalidState,
            "queue head is not unstaking",
            id
        )?;

        // Collect every entry submitted under the same handle.
        let mut run: Vec<UnlockRequest> = Vec::new(env);
        let mut pruned: Vec<u64> = Vec::new(env);
        let mut expected = head.amount;
        let mut latest_maturity = head.matures_at;
        let handle = head.handle;
        run.push_back(head);

        let mut next = id + 1;
        while next < cursors.unstake_cursor {
            let entry = get_unlock(env, next)?;
            if entry.status == UnlockStatus::Cancelled {
                pruned.push_back(next);
                next += 1;
                continue;
            }
            if entry.handle != handle {
                break;
            }
            expected = expected.safe_add(entry.amount, env)?;
            latest_maturity = latest_maturity.max(entry.matures_at);
            run.push_back(entry);
            next += 1;
        }

        if latest_maturity > now {
            log!(env, "Liquid Staking: queue head not mature yet", id, latest_maturity);
            break;
        }

        let settled = adapter::withdraw(env, &config, handle)?;

        state.total_unbonding = state.total_unbonding.safe_sub(expected, env)?;
        state.liquid_reserve = state.liquid_reserve.safe_add(settled, env)?;

        if settled < expected {
            log!(env, "Liquid Staking: unbonding settled short", expected, settled);
            ledger::decrease_pooled_value(env, expected - settled)?;
        } else if settled > expected {
            ledger::increase_pooled_value(env, settled - expected)?;
        }

        let mut remaining = settled;
        let last_index = run.len() - 1;
        for (index, mut request) in run.iter().enumerate() {
            request.settled = if (index as u32) == last_index {
                remaining
            } else {
                get_proportion(env, settled, request.amount, expected)?
            };
            remaining -= request.settled;
            request.status = UnlockStatus::Withdrawn;

            remove_unlock(env, request.id);
            LiquidStakingEvents::unlock_settled(env, &request);
        }
        for pruned_id in pruned.iter() {
            remove_unlock(env, pruned_id);
        }

        settled_entries += run.len();
        processed += next - id;
        total_expected = total_expected.safe_add(expected, env)?;
        total_settled = total_settled.safe_add(settled, env)?;
        id = next;
    }

    if id == cursors.withdraw_cursor {
        return Ok(0);
    }

    cursors.withdraw_cursor = id;
    save_cursors(env, &cursors);
    save_state(env, &state);

    if settled_entries > 0 {
        LiquidStakingEvents::process_withdraw(env, settled_entries, total_expected, total_settled);
    }

    Ok(total_settled)
}

/// Re-targets in-flight requests of the current validator to `new_target`.
///
/// The first call switches the validator and records a migration cursor;
/// each call visits at most `max_batch_size` queue entries and repeating the
/// call with the same target resumes where the previous one stopped.
/// Maturity is left untouched so a migration never resets the unbonding
/// clock. Returns the number of requests re-targeted by this call.
pub fn migrate_unlock(env: &Env, new_target: Address) -> LiquidResult<u32> {
    let mut config = get_config(env)?;
    let cursors = get_cursors(env);

    let mut migration = match get_migration(env) {
        Some(migration) => {
            validate!(
                env,
                migration.new_target == new_target,
                ErrorCode::InvalidState,
                "another validator migration is in progress"
            )?;
            migration
        }
        None => {
            validate!(
                env,
                new_target != config.validator,
                ErrorCode::InvalidState,
                "unlocks already target this validator"
            )?;

            let migration = UnlockMigration {
                previous_target: config.validator.clone(),
                new_target: new_target.clone(),
                cursor: cursors.withdraw_cursor,
                end: cursors.next_id,
            };
            config.validator = new_target.clone();
            save_config(env, &config);
            migration
        }
    };

    let mut migrated: u32 = 0;
    let mut scanned: u32 = 0;
    let mut id = migration.cursor.max(cursors.withdraw_cursor);

    while id < migration.end && scanned < config.max_batch_size {
        let mut request = get_unlock(env, id)?;
        let in_flight =
            request.status == UnlockStatus::Requested || request.status == UnlockStatus::Unstaking;
        if in_flight && request.target == migration.previous_target {
            request.target = new_target.clone();
            save_unlock(env, &request);
            safe_increment!(env, migrated, 1);
        }
        id += 1;
        scanned += 1;
    }

    let complete = id >= migration.end;
    if complete {
        remove_migration(env);
    } else {
        migration.cursor = id;
        save_migration(env, &migration);
    }

    LiquidStakingEvents::migrate_unlock(
        env,
        migration.previous_target,
        new_target,
        migrated,
        complete
    );

    Ok(migrated)
}
