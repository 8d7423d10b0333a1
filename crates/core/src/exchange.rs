// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift exchange workflow decisions.
//!
//! An exchange swaps one shift per party. Approval is the only transition
//! with schedule side effects: both parties' obligations change at once, so
//! the consecutive-hours guard runs per party and the result is carried as
//! advisory warnings rather than a block. The yearly quota is a soft cap
//! checked at request time against the requester only.

use crate::error::CoreError;
use crate::state::{ExchangeLeg, ShiftExchange};
use chrono::Datelike;
use fireshift_domain::{
    ConsecutiveCheck, EXCHANGE_QUOTA_PER_YEAR, ExchangeStatus, ObligationSource, ShiftObligation,
    validate_exchange_legs_distinct, validate_partial_window,
};
use serde::{Deserialize, Serialize};

/// A validated exchange request ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExchange {
    /// The person who initiated the swap.
    pub requester_id: i64,
    /// The person asked to swap.
    pub target_id: i64,
    /// The requester's own shift.
    pub requester_leg: ExchangeLeg,
    /// The target's shift.
    pub target_leg: ExchangeLeg,
    /// Free-text reason supplied by the requester.
    pub reason: Option<String>,
}

/// Outcome of a request decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestOutcome {
    /// The request is valid and may be inserted.
    Create(NewExchange),
    /// Request blocked: the requester is at their yearly quota and no
    /// override was given.
    QuotaExceeded {
        /// Exchanges already counted against the requester this year.
        current_count: u32,
        /// The yearly quota.
        quota: u32,
    },
}

/// Per-party consecutive-hours warnings attached to an approval.
///
/// `Some(hours)` means the swap pushes that party past the limit; the
/// approval proceeds regardless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ExchangeWarnings {
    /// Longest run for the requester, when it exceeds the limit.
    pub requester_hours: Option<f64>,
    /// Longest run for the target, when it exceeds the limit.
    pub target_hours: Option<f64>,
}

/// The transition committed when an exchange is approved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApprovePlan {
    /// The exchange moving `Pending -> Approved`.
    pub exchange_id: i64,
    /// The calendar year whose quota counter is incremented.
    pub quota_year: i32,
    /// Advisory consecutive-hours warnings for both parties.
    pub warnings: ExchangeWarnings,
}

/// Decides whether a new exchange may be requested.
///
/// `yearly_count` is the requester's approved-exchange count for the year of
/// their leg; `force` overrides the quota cap.
///
/// # Errors
///
/// Returns an error if:
/// - Requester and target are the same person
/// - Either partial window has zero length
/// - Both legs describe the same shift
pub fn decide_request(
    requester_id: i64,
    target_id: i64,
    requester_leg: ExchangeLeg,
    target_leg: ExchangeLeg,
    reason: Option<String>,
    yearly_count: u32,
    force: bool,
) -> Result<RequestOutcome, CoreError> {
    if requester_id == target_id {
        return Err(CoreError::SelfExchange {
            user_id: requester_id,
        });
    }
    for leg in [&requester_leg, &target_leg] {
        if let Some(window) = &leg.partial {
            validate_partial_window(window)?;
        }
    }
    validate_exchange_legs_distinct(
        (
            requester_leg.shift_date,
            requester_leg.shift_type,
            requester_leg.team_id,
        ),
        (
            target_leg.shift_date,
            target_leg.shift_type,
            target_leg.team_id,
        ),
    )?;

    if yearly_count >= EXCHANGE_QUOTA_PER_YEAR && !force {
        return Ok(RequestOutcome::QuotaExceeded {
            current_count: yearly_count,
            quota: EXCHANGE_QUOTA_PER_YEAR,
        });
    }

    Ok(RequestOutcome::Create(NewExchange {
        requester_id,
        target_id,
        requester_leg,
        target_leg,
        reason,
    }))
}

/// Builds the obligation the requester takes over on approval.
///
/// The requester works the target's leg. Feed this to the consecutive-hours
/// guard alongside the requester's remaining obligations.
#[must_use]
pub const fn requester_incoming_obligation(exchange: &ShiftExchange) -> ShiftObligation {
    ShiftObligation {
        source: ObligationSource::ExchangeLeg {
            exchange_id: exchange.exchange_id,
        },
        user_id: exchange.requester_id,
        date: exchange.target_leg.shift_date,
        shift_type: exchange.target_leg.shift_type,
        partial: exchange.target_leg.partial,
    }
}

/// Builds the obligation the target takes over on approval.
#[must_use]
pub const fn target_incoming_obligation(exchange: &ShiftExchange) -> ShiftObligation {
    ShiftObligation {
        source: ObligationSource::ExchangeLeg {
            exchange_id: exchange.exchange_id,
        },
        user_id: exchange.target_id,
        date: exchange.requester_leg.shift_date,
        shift_type: exchange.requester_leg.shift_type,
        partial: exchange.requester_leg.partial,
    }
}

/// Drops the shift a party is giving away from their obligation set.
///
/// While the exchange is pending the outgoing shift still appears among
/// the party's loaded obligations; counting it would inflate the guard run
/// with hours the party will not work once the swap lands.
#[must_use]
pub fn without_outgoing_leg(
    obligations: Vec<ShiftObligation>,
    outgoing: &ExchangeLeg,
) -> Vec<ShiftObligation> {
    obligations
        .into_iter()
        .filter(|obligation| {
            obligation.date != outgoing.shift_date || obligation.shift_type != outgoing.shift_type
        })
        .collect()
}

/// Decides whether a pending exchange may be approved.
///
/// `requester_check` and `target_check` are the consecutive-hours results
/// for each party's incoming leg; guard failures become advisory warnings
/// on the returned plan.
///
/// # Errors
///
/// Returns `CoreError::ExchangeNotPending` if the exchange has already been
/// resolved.
pub fn decide_approve(
    exchange: &ShiftExchange,
    requester_check: &ConsecutiveCheck,
    target_check: &ConsecutiveCheck,
) -> Result<ApprovePlan, CoreError> {
    ensure_pending(exchange)?;
    Ok(ApprovePlan {
        exchange_id: exchange.exchange_id,
        quota_year: exchange.requester_leg.shift_date.year(),
        warnings: ExchangeWarnings {
            requester_hours: requester_check
                .exceeds
                .then_some(requester_check.total_hours),
            target_hours: target_check.exceeds.then_some(target_check.total_hours),
        },
    })
}

/// Decides whether a pending exchange may be rejected.
///
/// # Errors
///
/// Returns `CoreError::ExchangeNotPending` if the exchange has already been
/// resolved.
pub fn decide_reject(exchange: &ShiftExchange) -> Result<(), CoreError> {
    ensure_pending(exchange)
}

/// Decides whether an exchange may be withdrawn.
///
/// Only the requester (or an admin acting on their behalf) may withdraw,
/// and only while the exchange is pending.
///
/// # Errors
///
/// Returns an error if:
/// - The exchange has already been resolved
/// - The actor is neither the requester nor an admin
pub fn decide_cancel(
    exchange: &ShiftExchange,
    actor_user_id: i64,
    actor_is_admin: bool,
) -> Result<(), CoreError> {
    ensure_pending(exchange)?;
    if actor_user_id != exchange.requester_id && !actor_is_admin {
        return Err(CoreError::NotExchangeRequester {
            exchange_id: exchange.exchange_id,
            user_id: actor_user_id,
        });
    }
    Ok(())
}

fn ensure_pending(exchange: &ShiftExchange) -> Result<(), CoreError> {
    if exchange.status != ExchangeStatus::Pending {
        return Err(CoreError::ExchangeNotPending {
            exchange_id: exchange.exchange_id,
            status: exchange.status.as_str().to_string(),
        });
    }
    Ok(())
}
