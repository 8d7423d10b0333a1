// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift exchange mutations.

use crate::backend;
use crate::data_models::{NewExchangeRow, format_date, partial_to_columns};
use crate::diesel_schema::{shift_exchanges, user_exchange_counts};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_core::{ApprovePlan, NewExchange};
use fireshift_domain::ExchangeStatus;
use tracing::debug;

/// Inserts a new pending exchange and returns its row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_exchange(
    conn: &mut SqliteConnection,
    new: &NewExchange,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let (requester_partial_start, requester_partial_end) =
        partial_to_columns(new.requester_leg.partial);
    let (target_partial_start, target_partial_end) = partial_to_columns(new.target_leg.partial);
    let row = NewExchangeRow {
        requester_id: new.requester_id,
        target_id: new.target_id,
        requester_date: format_date(new.requester_leg.shift_date),
        requester_shift_type: new.requester_leg.shift_type.as_str().to_string(),
        requester_team_id: new.requester_leg.team_id,
        requester_partial_start,
        requester_partial_end,
        target_date: format_date(new.target_leg.shift_date),
        target_shift_type: new.target_leg.shift_type.as_str().to_string(),
        target_team_id: new.target_leg.team_id,
        target_partial_start,
        target_partial_end,
        status: ExchangeStatus::Pending.as_str().to_string(),
        reason: new.reason.clone(),
        created_at: created_at.to_string(),
    };
    diesel::insert_into(shift_exchanges::table)
        .values(&row)
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Commits an approval: exchange `pending -> approved` with approver
/// attribution, plus the requester's yearly counter increment, in one
/// transaction.
///
/// The counter is charged to the requester only, against the year of their
/// own leg.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if the exchange is no longer
/// pending; the counter increment rolls back with it.
pub fn approve_exchange(
    conn: &mut SqliteConnection,
    plan: &ApprovePlan,
    requester_id: i64,
    approved_by: i64,
) -> Result<(), PersistenceError> {
    debug!(
        "Approving exchange {} (quota year {})",
        plan.exchange_id, plan.quota_year
    );
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated = diesel::update(
            shift_exchanges::table
                .filter(shift_exchanges::exchange_id.eq(plan.exchange_id))
                .filter(shift_exchanges::status.eq(ExchangeStatus::Pending.as_str())),
        )
        .set((
            shift_exchanges::status.eq(ExchangeStatus::Approved.as_str()),
            shift_exchanges::approved_by.eq(Some(approved_by)),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::StaleStatus {
                entity: "shift_exchange",
                id: plan.exchange_id,
            });
        }

        diesel::insert_into(user_exchange_counts::table)
            .values((
                user_exchange_counts::user_id.eq(requester_id),
                user_exchange_counts::year.eq(plan.quota_year),
                user_exchange_counts::exchange_count.eq(1),
            ))
            .on_conflict((user_exchange_counts::user_id, user_exchange_counts::year))
            .do_update()
            .set(
                user_exchange_counts::exchange_count
                    .eq(user_exchange_counts::exchange_count + 1),
            )
            .execute(conn)?;
        Ok(())
    })
}

/// Commits a rejection: exchange `pending -> rejected`, recording the
/// grounds if given.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if the exchange is no longer
/// pending.
pub fn reject_exchange(
    conn: &mut SqliteConnection,
    exchange_id: i64,
    reason: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        shift_exchanges::table
            .filter(shift_exchanges::exchange_id.eq(exchange_id))
            .filter(shift_exchanges::status.eq(ExchangeStatus::Pending.as_str())),
    )
    .set((
        shift_exchanges::status.eq(ExchangeStatus::Rejected.as_str()),
        shift_exchanges::rejected_reason.eq(reason.map(ToString::to_string)),
    ))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::StaleStatus {
            entity: "shift_exchange",
            id: exchange_id,
        });
    }
    Ok(())
}

/// Commits a withdrawal: exchange `pending -> cancelled`.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if the exchange is no longer
/// pending.
pub fn cancel_exchange(
    conn: &mut SqliteConnection,
    exchange_id: i64,
) -> Result<(), PersistenceError> {
    guarded_status_update(conn, exchange_id, ExchangeStatus::Cancelled)
}

fn guarded_status_update(
    conn: &mut SqliteConnection,
    exchange_id: i64,
    target: ExchangeStatus,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        shift_exchanges::table
            .filter(shift_exchanges::exchange_id.eq(exchange_id))
            .filter(shift_exchanges::status.eq(ExchangeStatus::Pending.as_str())),
    )
    .set(shift_exchanges::status.eq(target.as_str()))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::StaleStatus {
            entity: "shift_exchange",
            id: exchange_id,
        });
    }
    Ok(())
}
