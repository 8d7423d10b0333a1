// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift exchange queries.

use crate::data_models::ExchangeRow;
use crate::diesel_schema::{shift_exchanges, user_exchange_counts};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_core::ShiftExchange;

/// Retrieves an exchange by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the exchange does not exist.
pub fn get_exchange(
    conn: &mut SqliteConnection,
    exchange_id: i64,
) -> Result<ShiftExchange, PersistenceError> {
    let result: Result<ExchangeRow, diesel::result::Error> = shift_exchanges::table
        .filter(shift_exchanges::exchange_id.eq(exchange_id))
        .select(ExchangeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => ShiftExchange::try_from(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Exchange {exchange_id} not found"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists exchanges where the user is requester or target, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_exchanges_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<ShiftExchange>, PersistenceError> {
    let rows: Vec<ExchangeRow> = shift_exchanges::table
        .filter(
            shift_exchanges::requester_id
                .eq(user_id)
                .or(shift_exchanges::target_id.eq(user_id)),
        )
        .order(shift_exchanges::exchange_id.desc())
        .select(ExchangeRow::as_select())
        .load(conn)?;
    rows.into_iter().map(ShiftExchange::try_from).collect()
}

/// Returns the user's approved-exchange count for a year, zero if no
/// counter row exists yet.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_exchange_count(
    conn: &mut SqliteConnection,
    user_id: i64,
    year: i32,
) -> Result<u32, PersistenceError> {
    let result: Result<i32, diesel::result::Error> = user_exchange_counts::table
        .filter(user_exchange_counts::user_id.eq(user_id))
        .filter(user_exchange_counts::year.eq(year))
        .select(user_exchange_counts::exchange_count)
        .first(conn);

    match result {
        Ok(count) => u32::try_from(count).map_err(|_| {
            PersistenceError::DataCorruption(format!("negative exchange count {count}"))
        }),
        Err(diesel::result::Error::NotFound) => Ok(0),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
