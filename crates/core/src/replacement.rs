// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Replacement workflow decisions.
//!
//! Every function here is pure: it reads hydrated entities, applies the
//! lifecycle rules, and returns a typed plan describing the transition to
//! commit. Persistence enforces the same status preconditions again with a
//! status-guarded update, so a plan computed from stale data fails at commit
//! time instead of clobbering a concurrent transition.

use crate::error::CoreError;
use crate::state::{Replacement, ReplacementApplication};
use chrono::NaiveDate;
use fireshift_domain::{
    ApplicationStatus, ConsecutiveCheck, ObligationSource, PartialWindow, ReplacementStatus,
    ShiftObligation, ShiftType, validate_partial_window,
};
use serde::{Deserialize, Serialize};

/// A validated replacement request ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReplacement {
    /// The absent person, or `None` for an extra staffing slot.
    pub absent_user_id: Option<i64>,
    /// The team the shift belongs to.
    pub team_id: i64,
    /// The calendar date of the shift.
    pub shift_date: NaiveDate,
    /// The shape of the shift.
    pub shift_type: ShiftType,
    /// Optional narrowing when only part of the shift needs covering.
    pub partial: Option<PartialWindow>,
    /// Free-text reason supplied by the creator.
    pub reason: Option<String>,
}

/// A validated application ready to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    /// The replacement applied to.
    pub replacement_id: i64,
    /// The applicant.
    pub applicant_id: i64,
}

/// The transition committed when an application is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPlan {
    /// The replacement moving `Open -> Assigned`.
    pub replacement_id: i64,
    /// The application moving `Pending -> Approved`.
    pub application_id: i64,
    /// The substitute being assigned.
    pub applicant_id: i64,
}

/// Outcome of an approval decision.
///
/// Exceeding the consecutive-hours limit is not an error: it is a policy
/// outcome the caller surfaces to the admin, who may retry with an explicit
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ApproveOutcome {
    /// The assignment may proceed.
    Assign(AssignPlan),
    /// Assignment blocked: it would push the applicant past the
    /// consecutive-hours limit and no override was given.
    ConsecutiveHoursExceeded {
        /// The longest run the assignment would create, in hours.
        total_hours: f64,
    },
}

/// The transition committed when an assignment is reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignPlan {
    /// The replacement moving `Assigned -> Open`.
    pub replacement_id: i64,
    /// The application demoted `Approved -> Pending`.
    pub application_id: i64,
}

/// Validates a new replacement request.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the partial window has zero
/// length.
pub fn create_replacement(
    absent_user_id: Option<i64>,
    team_id: i64,
    shift_date: NaiveDate,
    shift_type: ShiftType,
    partial: Option<PartialWindow>,
    reason: Option<String>,
) -> Result<NewReplacement, CoreError> {
    if let Some(window) = &partial {
        validate_partial_window(window)?;
    }
    Ok(NewReplacement {
        absent_user_id,
        team_id,
        shift_date,
        shift_type,
        partial,
        reason,
    })
}

/// Decides whether an applicant may join the candidate pool.
///
/// # Errors
///
/// Returns an error if:
/// - The replacement is not `Open`
/// - The applicant already has an application for this replacement,
///   regardless of that application's status
pub fn decide_apply(
    replacement: &Replacement,
    applications: &[ReplacementApplication],
    applicant_id: i64,
) -> Result<NewApplication, CoreError> {
    if replacement.status != ReplacementStatus::Open {
        return Err(CoreError::ReplacementNotOpen {
            replacement_id: replacement.replacement_id,
            status: replacement.status.as_str().to_string(),
        });
    }
    if applications
        .iter()
        .any(|application| application.applicant_id == applicant_id)
    {
        return Err(CoreError::DuplicateApplication {
            replacement_id: replacement.replacement_id,
            applicant_id,
        });
    }
    Ok(NewApplication {
        replacement_id: replacement.replacement_id,
        applicant_id,
    })
}

/// Builds the obligation the applicant would take on if assigned.
///
/// Feed this to the consecutive-hours guard alongside the applicant's
/// existing obligations before approving.
#[must_use]
pub const fn candidate_obligation(replacement: &Replacement, applicant_id: i64) -> ShiftObligation {
    ShiftObligation {
        source: ObligationSource::ReplacementAssigned {
            replacement_id: replacement.replacement_id,
        },
        user_id: applicant_id,
        date: replacement.shift_date,
        shift_type: replacement.shift_type,
        partial: replacement.partial,
    }
}

/// Decides whether an application may be approved and the substitute
/// assigned.
///
/// `guard` is the consecutive-hours check for [`candidate_obligation`];
/// `force` overrides a guard failure.
///
/// # Errors
///
/// Returns an error if:
/// - The replacement is not `Open`
/// - The applicant has no application for this replacement
/// - The application is not `Pending`
pub fn decide_approve(
    replacement: &Replacement,
    applications: &[ReplacementApplication],
    applicant_id: i64,
    guard: &ConsecutiveCheck,
    force: bool,
) -> Result<ApproveOutcome, CoreError> {
    if replacement.status != ReplacementStatus::Open {
        return Err(CoreError::ReplacementNotOpen {
            replacement_id: replacement.replacement_id,
            status: replacement.status.as_str().to_string(),
        });
    }
    let application = applications
        .iter()
        .find(|application| application.applicant_id == applicant_id)
        .ok_or(CoreError::ApplicationNotFound {
            replacement_id: replacement.replacement_id,
            applicant_id,
        })?;
    if application.status != ApplicationStatus::Pending {
        return Err(CoreError::ApplicationNotPending {
            application_id: application.application_id,
            status: application.status.as_str().to_string(),
        });
    }

    if guard.exceeds && !force {
        return Ok(ApproveOutcome::ConsecutiveHoursExceeded {
            total_hours: guard.total_hours,
        });
    }

    Ok(ApproveOutcome::Assign(AssignPlan {
        replacement_id: replacement.replacement_id,
        application_id: application.application_id,
        applicant_id,
    }))
}

/// Decides whether an assigned replacement may be reverted to open.
///
/// The approved application is demoted back to `Pending`; the rest of the
/// candidate pool is untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The replacement is not `Assigned`
/// - No approved application exists for the replacement
pub fn decide_unassign(
    replacement: &Replacement,
    applications: &[ReplacementApplication],
) -> Result<UnassignPlan, CoreError> {
    if replacement.status != ReplacementStatus::Assigned {
        return Err(CoreError::ReplacementNotAssigned {
            replacement_id: replacement.replacement_id,
            status: replacement.status.as_str().to_string(),
        });
    }
    let approved = applications
        .iter()
        .find(|application| application.status == ApplicationStatus::Approved)
        .ok_or(CoreError::ApprovedApplicationMissing {
            replacement_id: replacement.replacement_id,
        })?;
    Ok(UnassignPlan {
        replacement_id: replacement.replacement_id,
        application_id: approved.application_id,
    })
}

/// Decides whether a single application may be rejected.
///
/// # Errors
///
/// Returns `CoreError::ApplicationNotPending` if the application has
/// already been reviewed.
pub fn decide_reject_application(application: &ReplacementApplication) -> Result<(), CoreError> {
    if application.status != ApplicationStatus::Pending {
        return Err(CoreError::ApplicationNotPending {
            application_id: application.application_id,
            status: application.status.as_str().to_string(),
        });
    }
    Ok(())
}

/// Decides whether a replacement may be cancelled.
///
/// Both `Open` and `Assigned` replacements may be cancelled; cancelling an
/// assigned replacement releases the substitute.
///
/// # Errors
///
/// Returns `CoreError::ReplacementTerminal` if the replacement is already
/// completed or cancelled.
pub fn decide_cancel(replacement: &Replacement) -> Result<(), CoreError> {
    if replacement.status.is_terminal() {
        return Err(CoreError::ReplacementTerminal {
            replacement_id: replacement.replacement_id,
            status: replacement.status.as_str().to_string(),
        });
    }
    Ok(())
}
