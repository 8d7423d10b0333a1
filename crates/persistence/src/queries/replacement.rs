// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Replacement and application queries.

use crate::data_models::{ApplicationRow, ReplacementRow};
use crate::diesel_schema::{replacement_applications, replacements};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_core::{Replacement, ReplacementApplication};
use fireshift_domain::ReplacementStatus;

/// Retrieves a replacement by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the replacement does not exist.
pub fn get_replacement(
    conn: &mut SqliteConnection,
    replacement_id: i64,
) -> Result<Replacement, PersistenceError> {
    let result: Result<ReplacementRow, diesel::result::Error> = replacements::table
        .filter(replacements::replacement_id.eq(replacement_id))
        .select(ReplacementRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Replacement::try_from(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Replacement {replacement_id} not found"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists replacements, optionally filtered by status, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_replacements(
    conn: &mut SqliteConnection,
    status: Option<ReplacementStatus>,
) -> Result<Vec<Replacement>, PersistenceError> {
    let mut query = replacements::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(replacements::status.eq(status.as_str()));
    }
    let rows: Vec<ReplacementRow> = query
        .order(replacements::replacement_id.desc())
        .select(ReplacementRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Replacement::try_from).collect()
}

/// Lists all applications for a replacement, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_applications(
    conn: &mut SqliteConnection,
    replacement_id: i64,
) -> Result<Vec<ReplacementApplication>, PersistenceError> {
    let rows: Vec<ApplicationRow> = replacement_applications::table
        .filter(replacement_applications::replacement_id.eq(replacement_id))
        .order(replacement_applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load(conn)?;
    rows.into_iter()
        .map(ReplacementApplication::try_from)
        .collect()
}

/// Retrieves a single application by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the application does not exist.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<ReplacementApplication, PersistenceError> {
    let result: Result<ApplicationRow, diesel::result::Error> = replacement_applications::table
        .filter(replacement_applications::application_id.eq(application_id))
        .select(ApplicationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => ReplacementApplication::try_from(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Application {application_id} not found"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
