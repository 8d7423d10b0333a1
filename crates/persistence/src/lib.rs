// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for FireShift.
//!
//! This crate provides `SQLite` persistence for the rotation roster,
//! replacement workflow, and shift exchanges. It is built on Diesel with
//! embedded migrations.
//!
//! ## Concurrency model
//!
//! Callers make workflow decisions against a snapshot read, then commit
//! them here. Every transition commit re-checks the expected status inside
//! its `UPDATE ... WHERE status = ?` clause; when a concurrent transition
//! got there first, the commit affects zero rows, the transaction rolls
//! back, and the caller receives [`PersistenceError::StaleStatus`]. At most
//! one of two racing transitions can succeed.
//!
//! ## Testing
//!
//! In-memory databases get a unique shared-cache name per instance via an
//! atomic counter, so parallel tests never share state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use diesel::SqliteConnection;
use fireshift_core::{
    ApprovePlan, AssignPlan, NewApplication, NewExchange, NewReplacement, Replacement,
    ReplacementApplication, ShiftExchange, UnassignPlan,
};
use fireshift_domain::{CycleConfig, PartialWindow, ShiftObligation, ShiftTemplate, ShiftType};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter owning the database connection.
///
/// All reads and writes go through this adapter; the Diesel connection is
/// never exposed.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    fn now_string() -> String {
        data_models::format_datetime(chrono::Utc::now().naive_utc())
    }

    // --- Cycle configuration ---

    /// Writes the cycle configuration singleton.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub fn set_cycle_config(&mut self, config: &CycleConfig) -> Result<(), PersistenceError> {
        mutations::roster::upsert_cycle_config(&mut self.conn, config)
    }

    /// Retrieves the cycle configuration singleton.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no configuration has been set.
    pub fn cycle_config(&mut self) -> Result<CycleConfig, PersistenceError> {
        queries::config::get_cycle_config(&mut self.conn)
    }

    // --- Roster setup ---

    /// Inserts a user, returning their row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_user(&mut self, name: &str, role: &str) -> Result<i64, PersistenceError> {
        mutations::roster::insert_user(&mut self.conn, name, role)
    }

    /// Inserts a team, returning its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails or the name is taken.
    pub fn create_team(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::roster::insert_team(&mut self.conn, name)
    }

    /// Adds a user to a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails or the membership exists.
    pub fn add_team_member(&mut self, team_id: i64, user_id: i64) -> Result<(), PersistenceError> {
        mutations::roster::insert_team_member(&mut self.conn, team_id, user_id)
    }

    /// Inserts a rotation shift template, returning its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails or the slot exists.
    pub fn create_shift(&mut self, template: &ShiftTemplate) -> Result<i64, PersistenceError> {
        mutations::roster::insert_shift(&mut self.conn, template)
    }

    /// Inserts a direct assignment, returning its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_direct_assignment(
        &mut self,
        user_id: i64,
        team_id: i64,
        shift_date: NaiveDate,
        shift_type: ShiftType,
        partial: Option<PartialWindow>,
    ) -> Result<i64, PersistenceError> {
        mutations::roster::insert_assignment(
            &mut self.conn,
            user_id,
            team_id,
            shift_date,
            shift_type,
            partial,
        )
    }

    // --- Replacement workflow ---

    /// Inserts a new open replacement, returning its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_replacement(&mut self, new: &NewReplacement) -> Result<i64, PersistenceError> {
        mutations::replacement::insert_replacement(&mut self.conn, new, &Self::now_string())
    }

    /// Retrieves a replacement by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the replacement does not exist.
    pub fn replacement(&mut self, replacement_id: i64) -> Result<Replacement, PersistenceError> {
        queries::replacement::get_replacement(&mut self.conn, replacement_id)
    }

    /// Lists replacements, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn replacements(
        &mut self,
        status: Option<fireshift_domain::ReplacementStatus>,
    ) -> Result<Vec<Replacement>, PersistenceError> {
        queries::replacement::list_replacements(&mut self.conn, status)
    }

    /// Inserts a new pending application, returning its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails or the applicant
    /// already applied.
    pub fn apply_to_replacement(
        &mut self,
        new: &NewApplication,
    ) -> Result<i64, PersistenceError> {
        mutations::replacement::insert_application(&mut self.conn, new, &Self::now_string())
    }

    /// Lists all applications for a replacement, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn applications_for(
        &mut self,
        replacement_id: i64,
    ) -> Result<Vec<ReplacementApplication>, PersistenceError> {
        queries::replacement::list_applications(&mut self.conn, replacement_id)
    }

    /// Retrieves a single application by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the application does not exist.
    pub fn application(
        &mut self,
        application_id: i64,
    ) -> Result<ReplacementApplication, PersistenceError> {
        queries::replacement::get_application(&mut self.conn, application_id)
    }

    /// Commits an assignment transition, recording the reviewing admin on
    /// the approved application.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if a concurrent transition
    /// won the race.
    pub fn assign_replacement(
        &mut self,
        plan: &AssignPlan,
        reviewed_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::replacement::assign_replacement(
            &mut self.conn,
            plan,
            reviewed_by,
            &Self::now_string(),
        )
    }

    /// Commits an unassignment transition.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if a concurrent transition
    /// won the race.
    pub fn unassign_replacement(&mut self, plan: &UnassignPlan) -> Result<(), PersistenceError> {
        mutations::replacement::unassign_replacement(&mut self.conn, plan)
    }

    /// Cancels a non-terminal replacement and invalidates its application
    /// pool in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if the replacement is already
    /// terminal.
    pub fn cancel_replacement(&mut self, replacement_id: i64) -> Result<(), PersistenceError> {
        mutations::replacement::cancel_replacement(&mut self.conn, replacement_id)
    }

    /// Rejects a pending application, recording the reviewing admin.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if the application is no
    /// longer pending.
    pub fn reject_application(
        &mut self,
        application_id: i64,
        reviewed_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::replacement::reject_application(
            &mut self.conn,
            application_id,
            reviewed_by,
            &Self::now_string(),
        )
    }

    /// Marks a replacement's open-slot announcement as dispatched.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the replacement does not
    /// exist.
    pub fn mark_replacement_notified(
        &mut self,
        replacement_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::replacement::mark_replacement_notified(&mut self.conn, replacement_id)
    }

    /// Completes every non-terminal replacement whose shift date has passed.
    /// Returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn complete_elapsed_replacements(
        &mut self,
        today: NaiveDate,
    ) -> Result<usize, PersistenceError> {
        mutations::replacement::complete_elapsed_replacements(&mut self.conn, today)
    }

    // --- Exchange workflow ---

    /// Inserts a new pending exchange, returning its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_exchange(&mut self, new: &NewExchange) -> Result<i64, PersistenceError> {
        mutations::exchange::insert_exchange(&mut self.conn, new, &Self::now_string())
    }

    /// Retrieves an exchange by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the exchange does not exist.
    pub fn exchange(&mut self, exchange_id: i64) -> Result<ShiftExchange, PersistenceError> {
        queries::exchange::get_exchange(&mut self.conn, exchange_id)
    }

    /// Lists exchanges involving the user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn exchanges_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<ShiftExchange>, PersistenceError> {
        queries::exchange::list_exchanges_for_user(&mut self.conn, user_id)
    }

    /// Commits an approval transition plus the requester's yearly counter
    /// increment, recording the approving admin.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if the exchange is no longer
    /// pending.
    pub fn approve_exchange(
        &mut self,
        plan: &ApprovePlan,
        requester_id: i64,
        approved_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::exchange::approve_exchange(&mut self.conn, plan, requester_id, approved_by)
    }

    /// Commits a rejection transition, recording the grounds if given.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if the exchange is no longer
    /// pending.
    pub fn reject_exchange(
        &mut self,
        exchange_id: i64,
        reason: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::exchange::reject_exchange(&mut self.conn, exchange_id, reason)
    }

    /// Commits a withdrawal transition.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleStatus` if the exchange is no longer
    /// pending.
    pub fn cancel_exchange(&mut self, exchange_id: i64) -> Result<(), PersistenceError> {
        mutations::exchange::cancel_exchange(&mut self.conn, exchange_id)
    }

    /// Returns the user's approved-exchange count for a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn exchange_count(&mut self, user_id: i64, year: i32) -> Result<u32, PersistenceError> {
        queries::exchange::get_exchange_count(&mut self.conn, user_id, year)
    }

    // --- Obligations ---

    /// Loads every obligation for a user with a start date in `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the cycle configuration has
    /// not been set, or an error if a query fails.
    pub fn load_obligations(
        &mut self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ShiftObligation>, PersistenceError> {
        let config = queries::config::get_cycle_config(&mut self.conn)?;
        queries::obligations::load_obligations(&mut self.conn, user_id, from, to, &config)
    }
}
