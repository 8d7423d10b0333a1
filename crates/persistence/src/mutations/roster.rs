// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster setup mutations: people, teams, rotation templates, direct
//! assignments, and the cycle configuration singleton.

use crate::backend;
use crate::data_models::{NewAssignmentRow, NewShiftRow, format_date, partial_to_columns};
use crate::diesel_schema::{cycle_config, shift_assignments, shifts, team_members, teams, users};
use crate::error::PersistenceError;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_domain::{CycleConfig, PartialWindow, ShiftTemplate, ShiftType};

/// Inserts a user and returns their row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_user(
    conn: &mut SqliteConnection,
    name: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((users::name.eq(name), users::role.eq(role)))
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Inserts a team and returns its row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails or the name is taken.
pub fn insert_team(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table)
        .values(teams::name.eq(name))
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Adds a user to a team.
///
/// # Errors
///
/// Returns an error if the database insert fails or the membership exists.
pub fn insert_team_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(team_members::table)
        .values((
            team_members::team_id.eq(team_id),
            team_members::user_id.eq(user_id),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts a rotation shift template and returns its row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails or the slot exists.
pub fn insert_shift(
    conn: &mut SqliteConnection,
    template: &ShiftTemplate,
) -> Result<i64, PersistenceError> {
    let row = NewShiftRow {
        team_id: template.team_id(),
        cycle_day: i32::from(template.cycle_day()),
        shift_type: template.shift_type().as_str().to_string(),
    };
    diesel::insert_into(shifts::table)
        .values(&row)
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Inserts a direct assignment and returns its row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    user_id: i64,
    team_id: i64,
    shift_date: NaiveDate,
    shift_type: ShiftType,
    partial: Option<PartialWindow>,
) -> Result<i64, PersistenceError> {
    let (partial_start, partial_end) = partial_to_columns(partial);
    let row = NewAssignmentRow {
        user_id,
        team_id,
        shift_date: format_date(shift_date),
        shift_type: shift_type.as_str().to_string(),
        partial_start,
        partial_end,
    };
    diesel::insert_into(shift_assignments::table)
        .values(&row)
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Writes the cycle configuration singleton, replacing any existing row.
///
/// # Errors
///
/// Returns an error if the database upsert fails.
pub fn upsert_cycle_config(
    conn: &mut SqliteConnection,
    config: &CycleConfig,
) -> Result<(), PersistenceError> {
    diesel::insert_into(cycle_config::table)
        .values((
            cycle_config::config_id.eq(1),
            cycle_config::start_date.eq(format_date(config.start_date())),
            cycle_config::cycle_length_days.eq(i32::from(config.cycle_length_days())),
            cycle_config::is_active.eq(i32::from(config.is_active())),
        ))
        .on_conflict(cycle_config::config_id)
        .do_update()
        .set((
            cycle_config::start_date.eq(format_date(config.start_date())),
            cycle_config::cycle_length_days.eq(i32::from(config.cycle_length_days())),
            cycle_config::is_active.eq(i32::from(config.is_active())),
        ))
        .execute(conn)?;
    Ok(())
}
