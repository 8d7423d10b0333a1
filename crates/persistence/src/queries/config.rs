// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle configuration queries.

use crate::data_models::CycleConfigRow;
use crate::diesel_schema::cycle_config;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_domain::CycleConfig;

/// Retrieves the cycle configuration singleton.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no configuration has been set.
pub fn get_cycle_config(conn: &mut SqliteConnection) -> Result<CycleConfig, PersistenceError> {
    let result: Result<CycleConfigRow, diesel::result::Error> = cycle_config::table
        .filter(cycle_config::config_id.eq(1))
        .select(CycleConfigRow::as_select())
        .first(conn);

    match result {
        Ok(row) => CycleConfig::try_from(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(
            "Cycle configuration has not been set".to_string(),
        )),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
