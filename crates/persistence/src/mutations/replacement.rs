// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Replacement workflow mutations.

use crate::backend;
use crate::data_models::{NewApplicationRow, NewReplacementRow, format_date, partial_to_columns};
use crate::diesel_schema::{replacement_applications, replacements};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_core::{AssignPlan, NewApplication, NewReplacement, UnassignPlan};
use fireshift_domain::{ApplicationStatus, ReplacementStatus};
use tracing::debug;

/// Inserts a new open replacement and returns its row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_replacement(
    conn: &mut SqliteConnection,
    new: &NewReplacement,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let (partial_start, partial_end) = partial_to_columns(new.partial);
    let row = NewReplacementRow {
        absent_user_id: new.absent_user_id,
        team_id: new.team_id,
        shift_date: format_date(new.shift_date),
        shift_type: new.shift_type.as_str().to_string(),
        partial_start,
        partial_end,
        status: ReplacementStatus::Open.as_str().to_string(),
        reason: new.reason.clone(),
        created_at: created_at.to_string(),
    };
    diesel::insert_into(replacements::table)
        .values(&row)
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Inserts a new pending application and returns its row ID.
///
/// The `UNIQUE (replacement_id, applicant_id)` constraint backs up the
/// duplicate check made in core; a lost race surfaces as
/// `PersistenceError::UniqueViolation`.
///
/// # Errors
///
/// Returns an error if the database insert fails or the applicant already
/// applied.
pub fn insert_application(
    conn: &mut SqliteConnection,
    new: &NewApplication,
    applied_at: &str,
) -> Result<i64, PersistenceError> {
    let row = NewApplicationRow {
        replacement_id: new.replacement_id,
        applicant_id: new.applicant_id,
        status: ApplicationStatus::Pending.as_str().to_string(),
        applied_at: applied_at.to_string(),
    };
    diesel::insert_into(replacement_applications::table)
        .values(&row)
        .execute(conn)?;
    backend::get_last_insert_rowid(conn)
}

/// Commits an assignment: replacement `open -> assigned`, application
/// `pending -> approved` with review attribution, in one transaction.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if either record changed status
/// since the decision was made; the transaction rolls back.
pub fn assign_replacement(
    conn: &mut SqliteConnection,
    plan: &AssignPlan,
    reviewed_by: i64,
    reviewed_at: &str,
) -> Result<(), PersistenceError> {
    debug!(
        "Assigning replacement {} to user {}",
        plan.replacement_id, plan.applicant_id
    );
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated = diesel::update(
            replacements::table
                .filter(replacements::replacement_id.eq(plan.replacement_id))
                .filter(replacements::status.eq(ReplacementStatus::Open.as_str())),
        )
        .set((
            replacements::status.eq(ReplacementStatus::Assigned.as_str()),
            replacements::assigned_user_id.eq(Some(plan.applicant_id)),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::StaleStatus {
                entity: "replacement",
                id: plan.replacement_id,
            });
        }

        let updated = diesel::update(
            replacement_applications::table
                .filter(replacement_applications::application_id.eq(plan.application_id))
                .filter(replacement_applications::status.eq(ApplicationStatus::Pending.as_str())),
        )
        .set((
            replacement_applications::status.eq(ApplicationStatus::Approved.as_str()),
            replacement_applications::reviewed_by.eq(Some(reviewed_by)),
            replacement_applications::reviewed_at.eq(Some(reviewed_at.to_string())),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::StaleStatus {
                entity: "replacement_application",
                id: plan.application_id,
            });
        }
        Ok(())
    })
}

/// Commits an unassignment: replacement `assigned -> open`, approved
/// application demoted to `pending` with its review attribution cleared,
/// in one transaction.
///
/// Other pending applications are untouched so the candidate pool survives.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if either record changed status
/// since the decision was made.
pub fn unassign_replacement(
    conn: &mut SqliteConnection,
    plan: &UnassignPlan,
) -> Result<(), PersistenceError> {
    debug!("Unassigning replacement {}", plan.replacement_id);
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated = diesel::update(
            replacements::table
                .filter(replacements::replacement_id.eq(plan.replacement_id))
                .filter(replacements::status.eq(ReplacementStatus::Assigned.as_str())),
        )
        .set((
            replacements::status.eq(ReplacementStatus::Open.as_str()),
            replacements::assigned_user_id.eq(None::<i64>),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::StaleStatus {
                entity: "replacement",
                id: plan.replacement_id,
            });
        }

        let updated = diesel::update(
            replacement_applications::table
                .filter(replacement_applications::application_id.eq(plan.application_id))
                .filter(replacement_applications::status.eq(ApplicationStatus::Approved.as_str())),
        )
        .set((
            replacement_applications::status.eq(ApplicationStatus::Pending.as_str()),
            replacement_applications::reviewed_by.eq(None::<i64>),
            replacement_applications::reviewed_at.eq(None::<String>),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::StaleStatus {
                entity: "replacement_application",
                id: plan.application_id,
            });
        }
        Ok(())
    })
}

/// Cancels a replacement from either non-terminal status, in one
/// transaction with its application pool.
///
/// An assigned substitute is released, and every pending or approved
/// application is invalidated to `rejected`. Review attribution is left
/// `NULL` on cascaded applications: nobody reviewed them.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if the replacement is already
/// terminal.
pub fn cancel_replacement(
    conn: &mut SqliteConnection,
    replacement_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated = diesel::update(
            replacements::table
                .filter(replacements::replacement_id.eq(replacement_id))
                .filter(replacements::status.eq_any([
                    ReplacementStatus::Open.as_str(),
                    ReplacementStatus::Assigned.as_str(),
                ])),
        )
        .set((
            replacements::status.eq(ReplacementStatus::Cancelled.as_str()),
            replacements::assigned_user_id.eq(None::<i64>),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::StaleStatus {
                entity: "replacement",
                id: replacement_id,
            });
        }

        diesel::update(
            replacement_applications::table
                .filter(replacement_applications::replacement_id.eq(replacement_id))
                .filter(replacement_applications::status.eq_any([
                    ApplicationStatus::Pending.as_str(),
                    ApplicationStatus::Approved.as_str(),
                ])),
        )
        .set((
            replacement_applications::status.eq(ApplicationStatus::Rejected.as_str()),
            replacement_applications::reviewed_by.eq(None::<i64>),
            replacement_applications::reviewed_at.eq(None::<String>),
        ))
        .execute(conn)?;
        Ok(())
    })
}

/// Rejects a single pending application, recording who reviewed it.
///
/// # Errors
///
/// Returns `PersistenceError::StaleStatus` if the application is no longer
/// pending.
pub fn reject_application(
    conn: &mut SqliteConnection,
    application_id: i64,
    reviewed_by: i64,
    reviewed_at: &str,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        replacement_applications::table
            .filter(replacement_applications::application_id.eq(application_id))
            .filter(replacement_applications::status.eq(ApplicationStatus::Pending.as_str())),
    )
    .set((
        replacement_applications::status.eq(ApplicationStatus::Rejected.as_str()),
        replacement_applications::reviewed_by.eq(Some(reviewed_by)),
        replacement_applications::reviewed_at.eq(Some(reviewed_at.to_string())),
    ))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::StaleStatus {
            entity: "replacement_application",
            id: application_id,
        });
    }
    Ok(())
}

/// Marks a replacement's open-slot announcement as dispatched.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the replacement does not exist.
pub fn mark_replacement_notified(
    conn: &mut SqliteConnection,
    replacement_id: i64,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        replacements::table.filter(replacements::replacement_id.eq(replacement_id)),
    )
    .set(replacements::notification_sent.eq(1))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Replacement {replacement_id} not found"
        )));
    }
    Ok(())
}

/// Marks every non-terminal replacement whose shift date has passed as
/// completed. Returns the number of rows updated.
///
/// The assigned substitute, if any, stays on the record as the person who
/// covered the shift.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn complete_elapsed_replacements(
    conn: &mut SqliteConnection,
    today: chrono::NaiveDate,
) -> Result<usize, PersistenceError> {
    let updated = diesel::update(
        replacements::table
            .filter(replacements::shift_date.lt(format_date(today)))
            .filter(replacements::status.eq_any([
                ReplacementStatus::Open.as_str(),
                ReplacementStatus::Assigned.as_str(),
            ])),
    )
    .set(replacements::status.eq(ReplacementStatus::Completed.as_str()))
    .execute(conn)?;
    Ok(updated)
}
