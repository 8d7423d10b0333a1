// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operation handlers.
//!
//! Each handler authorizes the actor, reads the entities it needs, asks the
//! core layer for a decision, commits the resulting plan, and emits a
//! [`ScheduleEvent`] after the commit. Handlers never contain workflow rules
//! themselves.

use chrono::{Datelike, Days, NaiveDate};
use fireshift_core::{ApproveOutcome, RequestOutcome};
use fireshift_domain::{
    CycleConfig, GUARD_WINDOW_DAYS, MAX_CONSECUTIVE_HOURS, ObligationSource, ShiftObligation,
    check_consecutive_hours, cycle_day_of,
};
use fireshift_persistence::Persistence;
use tracing::debug;

use crate::auth::{AuthenticatedActor, require_admin, require_self_or_admin};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::hooks::{Notifier, PostCommitHook, ScheduleEvent};
use crate::request_response::{
    ApplyRequest, ApplyResponse, ApproveExchangeResponse, ApproveReplacementRequest,
    ApproveReplacementResponse, CancelExchangeResponse, CancelReplacementResponse,
    CompleteElapsedResponse, CreateReplacementRequest, CycleConfigInfo, CycleDayResponse,
    ExchangeInfo, GetReplacementResponse, GuardCheckRequest, GuardCheckResponse,
    RejectApplicationResponse, RejectExchangeResponse, ReplacementInfo, RequestExchangeRequest,
    RequestExchangeResponse, SetCycleConfigRequest, UnassignResponse,
};

fn emit(notifier: &dyn Notifier, hook: &dyn PostCommitHook, event: &ScheduleEvent) {
    hook.after_commit(event);
    notifier.notify(event);
}

/// Loads the actor's obligations in the guard window around `date`.
fn obligations_around(
    persistence: &mut Persistence,
    user_id: i64,
    date: NaiveDate,
) -> Result<Vec<ShiftObligation>, ApiError> {
    let from = date
        .checked_sub_days(Days::new(GUARD_WINDOW_DAYS))
        .unwrap_or(date);
    let to = date
        .checked_add_days(Days::new(GUARD_WINDOW_DAYS))
        .unwrap_or(date);
    persistence
        .load_obligations(user_id, from, to)
        .map_err(translate_persistence_error)
}

// --- Cycle configuration ---

/// Sets the rotation epoch configuration. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the configuration is
/// invalid, or the database write fails.
pub fn set_cycle_config(
    persistence: &mut Persistence,
    request: &SetCycleConfigRequest,
    actor: &AuthenticatedActor,
) -> Result<CycleConfigInfo, ApiError> {
    require_admin(actor, "set cycle configuration")?;
    let config = CycleConfig::new(request.start_date, request.cycle_length_days, request.active)
        .map_err(translate_domain_error)?;
    persistence
        .set_cycle_config(&config)
        .map_err(translate_persistence_error)?;
    debug!(
        "cycle config set: epoch {} length {}",
        request.start_date, request.cycle_length_days
    );
    Ok(CycleConfigInfo {
        start_date: config.start_date(),
        cycle_length_days: config.cycle_length_days(),
        active: config.is_active(),
    })
}

/// Retrieves the rotation epoch configuration.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no configuration has been set.
pub fn get_cycle_config(persistence: &mut Persistence) -> Result<CycleConfigInfo, ApiError> {
    let config = persistence
        .cycle_config()
        .map_err(translate_persistence_error)?;
    Ok(CycleConfigInfo {
        start_date: config.start_date(),
        cycle_length_days: config.cycle_length_days(),
        active: config.is_active(),
    })
}

/// Computes the cycle day for a calendar date.
///
/// # Errors
///
/// Returns an error if no configuration has been set.
pub fn get_cycle_day(
    persistence: &mut Persistence,
    date: NaiveDate,
) -> Result<CycleDayResponse, ApiError> {
    let config = persistence
        .cycle_config()
        .map_err(translate_persistence_error)?;
    let cycle_day = cycle_day_of(date, &config).map_err(translate_domain_error)?;
    Ok(CycleDayResponse { date, cycle_day })
}

// --- Consecutive-hours probe ---

/// Runs the consecutive-hours guard for a hypothetical shift without
/// committing anything.
///
/// # Errors
///
/// Returns an error if obligations cannot be loaded.
pub fn check_guard(
    persistence: &mut Persistence,
    request: &GuardCheckRequest,
) -> Result<GuardCheckResponse, ApiError> {
    let candidate = ShiftObligation {
        // A probe has no backing record; the source is never persisted.
        source: ObligationSource::DirectAssignment { assignment_id: 0 },
        user_id: request.user_id,
        date: request.shift_date,
        shift_type: request.shift_type,
        partial: request.partial,
    };
    let existing = obligations_around(persistence, request.user_id, request.shift_date)?;
    let check = check_consecutive_hours(&existing, &candidate);
    Ok(GuardCheckResponse {
        exceeds: check.exceeds,
        total_hours: check.total_hours,
        limit: MAX_CONSECUTIVE_HOURS,
    })
}

// --- Replacement workflow ---

/// Opens a replacement for a shift.
///
/// A firefighter may report their own absence; an extra staffing slot
/// (no absent person) requires an admin.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the partial window is
/// invalid, or the database insert fails.
pub fn create_replacement(
    persistence: &mut Persistence,
    request: CreateReplacementRequest,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<ReplacementInfo, ApiError> {
    match request.absent_user_id {
        Some(absent_user_id) => {
            require_self_or_admin(actor, absent_user_id, "create replacement")?;
        }
        None => require_admin(actor, "create extra staffing slot")?,
    }
    let new = fireshift_core::create_replacement(
        request.absent_user_id,
        request.team_id,
        request.shift_date,
        request.shift_type,
        request.partial,
        request.reason,
    )
    .map_err(translate_core_error)?;
    let replacement_id = persistence
        .create_replacement(&new)
        .map_err(translate_persistence_error)?;
    emit(
        notifier,
        hook,
        &ScheduleEvent::ReplacementCreated {
            replacement_id,
            team_id: new.team_id,
        },
    );
    persistence
        .mark_replacement_notified(replacement_id)
        .map_err(translate_persistence_error)?;
    let replacement = persistence
        .replacement(replacement_id)
        .map_err(translate_persistence_error)?;
    Ok(ReplacementInfo::from(replacement))
}

/// Retrieves a replacement with its full candidate pool.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the replacement does not exist.
pub fn get_replacement(
    persistence: &mut Persistence,
    replacement_id: i64,
) -> Result<GetReplacementResponse, ApiError> {
    let replacement = persistence
        .replacement(replacement_id)
        .map_err(translate_persistence_error)?;
    let applications = persistence
        .applications_for(replacement_id)
        .map_err(translate_persistence_error)?;
    Ok(GetReplacementResponse {
        replacement: ReplacementInfo::from(replacement),
        applications: applications.into_iter().map(Into::into).collect(),
    })
}

/// Lists replacements, optionally filtered by status, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_replacements(
    persistence: &mut Persistence,
    status: Option<fireshift_domain::ReplacementStatus>,
) -> Result<Vec<ReplacementInfo>, ApiError> {
    let replacements = persistence
        .replacements(status)
        .map_err(translate_persistence_error)?;
    Ok(replacements.into_iter().map(Into::into).collect())
}

/// Applies as a substitute for an open replacement.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the replacement is not
/// open, or the applicant already applied.
pub fn apply_to_replacement(
    persistence: &mut Persistence,
    request: &ApplyRequest,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<ApplyResponse, ApiError> {
    require_self_or_admin(actor, request.applicant_id, "apply to replacement")?;
    let replacement = persistence
        .replacement(request.replacement_id)
        .map_err(translate_persistence_error)?;
    let applications = persistence
        .applications_for(request.replacement_id)
        .map_err(translate_persistence_error)?;
    let new = fireshift_core::decide_apply(&replacement, &applications, request.applicant_id)
        .map_err(translate_core_error)?;
    let application_id = persistence
        .apply_to_replacement(&new)
        .map_err(translate_persistence_error)?;
    emit(
        notifier,
        hook,
        &ScheduleEvent::ApplicationReceived {
            replacement_id: request.replacement_id,
            applicant_id: request.applicant_id,
        },
    );
    Ok(ApplyResponse {
        application_id,
        message: format!(
            "Application received for replacement {}",
            request.replacement_id
        ),
    })
}

/// Approves an application and assigns the substitute. Admin only.
///
/// The consecutive-hours guard runs on the applicant's schedule first; a
/// guard failure is reported as an outcome, not an error, and may be
/// overridden with `force`.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the replacement is not
/// open, the application is missing or already reviewed, or a concurrent
/// transition won the race.
pub fn approve_replacement(
    persistence: &mut Persistence,
    request: &ApproveReplacementRequest,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<ApproveReplacementResponse, ApiError> {
    require_admin(actor, "approve replacement application")?;
    let replacement = persistence
        .replacement(request.replacement_id)
        .map_err(translate_persistence_error)?;
    let applications = persistence
        .applications_for(request.replacement_id)
        .map_err(translate_persistence_error)?;

    let candidate = fireshift_core::candidate_obligation(&replacement, request.applicant_id);
    let existing = obligations_around(persistence, request.applicant_id, replacement.shift_date)?;
    let guard = check_consecutive_hours(&existing, &candidate);

    let outcome = fireshift_core::decide_approve(
        &replacement,
        &applications,
        request.applicant_id,
        &guard,
        request.force,
    )
    .map_err(translate_core_error)?;

    match outcome {
        ApproveOutcome::Assign(plan) => {
            persistence
                .assign_replacement(&plan, actor.user_id)
                .map_err(translate_persistence_error)?;
            emit(
                notifier,
                hook,
                &ScheduleEvent::ReplacementAssigned {
                    replacement_id: plan.replacement_id,
                    substitute_id: plan.applicant_id,
                },
            );
            Ok(ApproveReplacementResponse::Assigned {
                replacement_id: plan.replacement_id,
                substitute_id: plan.applicant_id,
            })
        }
        ApproveOutcome::ConsecutiveHoursExceeded { total_hours } => {
            debug!(
                "assignment blocked: {total_hours}h consecutive for user {}",
                request.applicant_id
            );
            Ok(ApproveReplacementResponse::ConsecutiveHoursExceeded {
                total_hours,
                limit: MAX_CONSECUTIVE_HOURS,
            })
        }
    }
}

/// Reverts an assigned replacement to open. Admin only.
///
/// The approved application is demoted back to pending; the rest of the
/// candidate pool is untouched.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the replacement is not
/// assigned, or a concurrent transition won the race.
pub fn unassign_replacement(
    persistence: &mut Persistence,
    replacement_id: i64,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<UnassignResponse, ApiError> {
    require_admin(actor, "unassign replacement")?;
    let replacement = persistence
        .replacement(replacement_id)
        .map_err(translate_persistence_error)?;
    let applications = persistence
        .applications_for(replacement_id)
        .map_err(translate_persistence_error)?;
    let plan = fireshift_core::decide_unassign(&replacement, &applications)
        .map_err(translate_core_error)?;
    persistence
        .unassign_replacement(&plan)
        .map_err(translate_persistence_error)?;
    emit(
        notifier,
        hook,
        &ScheduleEvent::ReplacementUnassigned { replacement_id },
    );
    Ok(UnassignResponse {
        replacement_id,
        message: format!("Replacement {replacement_id} is open again"),
    })
}

/// Rejects a single pending application. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the application has
/// already been reviewed, or a concurrent transition won the race.
pub fn reject_application(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<RejectApplicationResponse, ApiError> {
    require_admin(actor, "reject application")?;
    let application = persistence
        .application(application_id)
        .map_err(translate_persistence_error)?;
    fireshift_core::decide_reject_application(&application).map_err(translate_core_error)?;
    persistence
        .reject_application(application_id, actor.user_id)
        .map_err(translate_persistence_error)?;
    emit(
        notifier,
        hook,
        &ScheduleEvent::ApplicationRejected { application_id },
    );
    Ok(RejectApplicationResponse {
        application_id,
        message: format!("Application {application_id} rejected"),
    })
}

/// Cancels a replacement.
///
/// The absent person may withdraw their own request; a slot with no absent
/// person is admin only. Cancelling an assigned replacement releases the
/// substitute.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the replacement is
/// already terminal, or a concurrent transition won the race.
pub fn cancel_replacement(
    persistence: &mut Persistence,
    replacement_id: i64,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<CancelReplacementResponse, ApiError> {
    let replacement = persistence
        .replacement(replacement_id)
        .map_err(translate_persistence_error)?;
    match replacement.absent_user_id {
        Some(absent_user_id) => {
            require_self_or_admin(actor, absent_user_id, "cancel replacement")?;
        }
        None => require_admin(actor, "cancel extra staffing slot")?,
    }
    fireshift_core::decide_cancel(&replacement).map_err(translate_core_error)?;
    persistence
        .cancel_replacement(replacement_id)
        .map_err(translate_persistence_error)?;
    emit(
        notifier,
        hook,
        &ScheduleEvent::ReplacementCancelled { replacement_id },
    );
    Ok(CancelReplacementResponse {
        replacement_id,
        message: format!("Replacement {replacement_id} cancelled"),
    })
}

/// Marks every non-terminal replacement with a past shift date completed.
/// Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the database update
/// fails.
pub fn complete_elapsed_replacements(
    persistence: &mut Persistence,
    today: NaiveDate,
    actor: &AuthenticatedActor,
) -> Result<CompleteElapsedResponse, ApiError> {
    require_admin(actor, "complete elapsed replacements")?;
    let completed = persistence
        .complete_elapsed_replacements(today)
        .map_err(translate_persistence_error)?;
    debug!("completed {completed} elapsed replacements before {today}");
    Ok(CompleteElapsedResponse { completed })
}

// --- Exchange workflow ---

/// Proposes a shift exchange between two people.
///
/// The requester's yearly quota is checked as a soft cap; `force` overrides
/// it.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the legs are invalid or
/// identical, requester and target are the same person, or the database
/// insert fails.
pub fn request_exchange(
    persistence: &mut Persistence,
    request: RequestExchangeRequest,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<RequestExchangeResponse, ApiError> {
    require_self_or_admin(actor, request.requester_id, "request exchange")?;
    let quota_year = request.requester_leg.shift_date.year();
    let yearly_count = persistence
        .exchange_count(request.requester_id, quota_year)
        .map_err(translate_persistence_error)?;

    let outcome = fireshift_core::decide_request(
        request.requester_id,
        request.target_id,
        request.requester_leg,
        request.target_leg,
        request.reason,
        yearly_count,
        request.force,
    )
    .map_err(translate_core_error)?;

    match outcome {
        RequestOutcome::Create(new) => {
            let exchange_id = persistence
                .create_exchange(&new)
                .map_err(translate_persistence_error)?;
            emit(
                notifier,
                hook,
                &ScheduleEvent::ExchangeRequested {
                    exchange_id,
                    target_id: new.target_id,
                },
            );
            Ok(RequestExchangeResponse::Created { exchange_id })
        }
        RequestOutcome::QuotaExceeded {
            current_count,
            quota,
        } => {
            debug!(
                "exchange request blocked: user {} at {current_count}/{quota} for {quota_year}",
                request.requester_id
            );
            Ok(RequestExchangeResponse::QuotaExceeded {
                current_count,
                quota,
            })
        }
    }
}

/// Retrieves an exchange by ID.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the exchange does not exist.
pub fn get_exchange(
    persistence: &mut Persistence,
    exchange_id: i64,
) -> Result<ExchangeInfo, ApiError> {
    let exchange = persistence
        .exchange(exchange_id)
        .map_err(translate_persistence_error)?;
    Ok(ExchangeInfo::from(exchange))
}

/// Lists exchanges involving a user, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the query fails.
pub fn list_exchanges_for_user(
    persistence: &mut Persistence,
    user_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Vec<ExchangeInfo>, ApiError> {
    require_self_or_admin(actor, user_id, "list exchanges")?;
    let exchanges = persistence
        .exchanges_for_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(exchanges.into_iter().map(Into::into).collect())
}

/// Approves a pending exchange. Admin only.
///
/// The consecutive-hours guard runs once per party on the leg that party
/// takes over; failures are advisory warnings on the response, never a
/// block. The requester's yearly counter is incremented in the same
/// transaction as the status flip.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the exchange has already
/// been resolved, or a concurrent transition won the race.
pub fn approve_exchange(
    persistence: &mut Persistence,
    exchange_id: i64,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<ApproveExchangeResponse, ApiError> {
    require_admin(actor, "approve exchange")?;
    let exchange = persistence
        .exchange(exchange_id)
        .map_err(translate_persistence_error)?;

    // Each party's guard input drops the leg they are giving away, so a
    // shift about to change hands cannot produce a spurious warning.
    let requester_incoming = fireshift_core::requester_incoming_obligation(&exchange);
    let requester_existing = fireshift_core::without_outgoing_leg(
        obligations_around(
            persistence,
            exchange.requester_id,
            exchange.target_leg.shift_date,
        )?,
        &exchange.requester_leg,
    );
    let requester_check = check_consecutive_hours(&requester_existing, &requester_incoming);

    let target_incoming = fireshift_core::target_incoming_obligation(&exchange);
    let target_existing = fireshift_core::without_outgoing_leg(
        obligations_around(
            persistence,
            exchange.target_id,
            exchange.requester_leg.shift_date,
        )?,
        &exchange.target_leg,
    );
    let target_check = check_consecutive_hours(&target_existing, &target_incoming);

    let plan = fireshift_core::decide_exchange_approve(&exchange, &requester_check, &target_check)
        .map_err(translate_core_error)?;
    persistence
        .approve_exchange(&plan, exchange.requester_id, actor.user_id)
        .map_err(translate_persistence_error)?;
    emit(notifier, hook, &ScheduleEvent::ExchangeApproved { exchange_id });
    Ok(ApproveExchangeResponse {
        exchange_id,
        warnings: plan.warnings,
    })
}

/// Rejects a pending exchange, recording the grounds if given. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the exchange has already
/// been resolved, or a concurrent transition won the race.
pub fn reject_exchange(
    persistence: &mut Persistence,
    exchange_id: i64,
    reason: Option<&str>,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<RejectExchangeResponse, ApiError> {
    require_admin(actor, "reject exchange")?;
    let exchange = persistence
        .exchange(exchange_id)
        .map_err(translate_persistence_error)?;
    fireshift_core::decide_exchange_reject(&exchange).map_err(translate_core_error)?;
    persistence
        .reject_exchange(exchange_id, reason)
        .map_err(translate_persistence_error)?;
    emit(notifier, hook, &ScheduleEvent::ExchangeRejected { exchange_id });
    Ok(RejectExchangeResponse {
        exchange_id,
        message: format!("Exchange {exchange_id} rejected"),
    })
}

/// Withdraws a pending exchange.
///
/// Only the requester or an admin may withdraw.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the exchange has
/// already been resolved, or a concurrent transition won the race.
pub fn cancel_exchange(
    persistence: &mut Persistence,
    exchange_id: i64,
    actor: &AuthenticatedActor,
    notifier: &dyn Notifier,
    hook: &dyn PostCommitHook,
) -> Result<CancelExchangeResponse, ApiError> {
    let exchange = persistence
        .exchange(exchange_id)
        .map_err(translate_persistence_error)?;
    fireshift_core::decide_exchange_cancel(&exchange, actor.user_id, actor.is_admin())
        .map_err(translate_core_error)?;
    persistence
        .cancel_exchange(exchange_id)
        .map_err(translate_persistence_error)?;
    emit(notifier, hook, &ScheduleEvent::ExchangeCancelled { exchange_id });
    Ok(CancelExchangeResponse {
        exchange_id,
        message: format!("Exchange {exchange_id} withdrawn"),
    })
}
