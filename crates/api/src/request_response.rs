// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use chrono::{NaiveDate, NaiveDateTime};
use fireshift_core::{ExchangeLeg, ExchangeWarnings, Replacement, ReplacementApplication, ShiftExchange};
use fireshift_domain::{
    ApplicationStatus, ExchangeStatus, PartialWindow, ReplacementStatus, ShiftType,
};
use serde::{Deserialize, Serialize};

/// API request to set the rotation epoch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCycleConfigRequest {
    /// The epoch date; this date is cycle day 1.
    pub start_date: NaiveDate,
    /// Length of the repeating cycle in days.
    pub cycle_length_days: u16,
    /// Whether the rotation is active.
    pub active: bool,
}

/// The rotation epoch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfigInfo {
    /// The epoch date.
    pub start_date: NaiveDate,
    /// Length of the repeating cycle in days.
    pub cycle_length_days: u16,
    /// Whether the rotation is active.
    pub active: bool,
}

/// API response for a cycle-day lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDayResponse {
    /// The date looked up.
    pub date: NaiveDate,
    /// Its 1-based position in the cycle.
    pub cycle_day: u8,
}

/// API request for a read-only consecutive-hours probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardCheckRequest {
    /// The person whose schedule is checked.
    pub user_id: i64,
    /// The candidate shift date.
    pub shift_date: NaiveDate,
    /// The candidate shift shape.
    pub shift_type: ShiftType,
    /// Optional narrowing of the candidate shift.
    pub partial: Option<PartialWindow>,
}

/// API response for a consecutive-hours probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuardCheckResponse {
    /// Whether the candidate would exceed the limit.
    pub exceeds: bool,
    /// Longest run the candidate would create, in hours.
    pub total_hours: f64,
    /// The configured limit, in hours.
    pub limit: f64,
}

/// API request to open a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReplacementRequest {
    /// The absent person, or `None` for an extra staffing slot.
    pub absent_user_id: Option<i64>,
    /// The team whose shift needs covering.
    pub team_id: i64,
    /// The shift date.
    pub shift_date: NaiveDate,
    /// The shift shape.
    pub shift_type: ShiftType,
    /// Optional narrowing when only part of the shift needs covering.
    pub partial: Option<PartialWindow>,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// A replacement as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementInfo {
    /// The replacement ID.
    pub replacement_id: i64,
    /// The absent person, if any.
    pub absent_user_id: Option<i64>,
    /// The team whose shift needs covering.
    pub team_id: i64,
    /// The shift date.
    pub shift_date: NaiveDate,
    /// The shift shape.
    pub shift_type: ShiftType,
    /// Optional narrowing of the shift.
    pub partial: Option<PartialWindow>,
    /// Current lifecycle status.
    pub status: ReplacementStatus,
    /// The assigned substitute, when assigned.
    pub assigned_user_id: Option<i64>,
    /// Free-text reason.
    pub reason: Option<String>,
    /// Whether the opening of this slot has been announced.
    pub notification_sent: bool,
}

impl From<Replacement> for ReplacementInfo {
    fn from(replacement: Replacement) -> Self {
        Self {
            replacement_id: replacement.replacement_id,
            absent_user_id: replacement.absent_user_id,
            team_id: replacement.team_id,
            shift_date: replacement.shift_date,
            shift_type: replacement.shift_type,
            partial: replacement.partial,
            status: replacement.status,
            assigned_user_id: replacement.assigned_user_id,
            reason: replacement.reason,
            notification_sent: replacement.notification_sent,
        }
    }
}

/// An application as returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// The application ID.
    pub application_id: i64,
    /// The replacement applied to.
    pub replacement_id: i64,
    /// The applicant.
    pub applicant_id: i64,
    /// Current application status.
    pub status: ApplicationStatus,
    /// When the application was submitted.
    pub applied_at: NaiveDateTime,
    /// The admin who reviewed this application, if reviewed.
    pub reviewed_by: Option<i64>,
    /// When the review happened.
    pub reviewed_at: Option<NaiveDateTime>,
}

impl From<ReplacementApplication> for ApplicationInfo {
    fn from(application: ReplacementApplication) -> Self {
        Self {
            application_id: application.application_id,
            replacement_id: application.replacement_id,
            applicant_id: application.applicant_id,
            status: application.status,
            applied_at: application.applied_at,
            reviewed_by: application.reviewed_by,
            reviewed_at: application.reviewed_at,
        }
    }
}

/// API response for a replacement lookup, including its candidate pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReplacementResponse {
    /// The replacement.
    pub replacement: ReplacementInfo,
    /// All applications, oldest first.
    pub applications: Vec<ApplicationInfo>,
}

/// API request to apply as a substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRequest {
    /// The replacement applied to.
    pub replacement_id: i64,
    /// The applicant.
    pub applicant_id: i64,
}

/// API response for a successful application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResponse {
    /// The new application's ID.
    pub application_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to approve an application and assign the substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveReplacementRequest {
    /// The replacement.
    pub replacement_id: i64,
    /// The applicant to assign.
    pub applicant_id: i64,
    /// Override a consecutive-hours guard failure.
    #[serde(default)]
    pub force: bool,
}

/// API response for an approval decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApproveReplacementResponse {
    /// The substitute was assigned.
    Assigned {
        /// The replacement.
        replacement_id: i64,
        /// The assigned substitute.
        substitute_id: i64,
    },
    /// Assignment blocked by the consecutive-hours guard; retry with
    /// `force` to override.
    ConsecutiveHoursExceeded {
        /// Longest run the assignment would create, in hours.
        total_hours: f64,
        /// The configured limit, in hours.
        limit: f64,
    },
}

/// API response for a successful unassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignResponse {
    /// The replacement, open again.
    pub replacement_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReplacementResponse {
    /// The cancelled replacement.
    pub replacement_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a rejected application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectApplicationResponse {
    /// The rejected application.
    pub application_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for the elapsed-replacement sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteElapsedResponse {
    /// Number of replacements marked completed.
    pub completed: usize,
}

/// API request to propose a shift exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestExchangeRequest {
    /// The person initiating the swap.
    pub requester_id: i64,
    /// The person asked to swap.
    pub target_id: i64,
    /// The requester's own shift.
    pub requester_leg: ExchangeLeg,
    /// The target's shift.
    pub target_leg: ExchangeLeg,
    /// Free-text reason.
    pub reason: Option<String>,
    /// Override the yearly quota cap.
    #[serde(default)]
    pub force: bool,
}

/// API response for an exchange request decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RequestExchangeResponse {
    /// The exchange was created and awaits approval.
    Created {
        /// The new exchange's ID.
        exchange_id: i64,
    },
    /// Request blocked by the yearly quota; retry with `force` to
    /// override.
    QuotaExceeded {
        /// Exchanges already counted this year.
        current_count: u32,
        /// The yearly quota.
        quota: u32,
    },
}

/// An exchange as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeInfo {
    /// The exchange ID.
    pub exchange_id: i64,
    /// The person who initiated the swap.
    pub requester_id: i64,
    /// The person asked to swap.
    pub target_id: i64,
    /// The requester's own shift.
    pub requester_leg: ExchangeLeg,
    /// The target's shift.
    pub target_leg: ExchangeLeg,
    /// Current lifecycle status.
    pub status: ExchangeStatus,
    /// Free-text reason.
    pub reason: Option<String>,
    /// The admin who approved the swap, when approved.
    pub approved_by: Option<i64>,
    /// Grounds for rejection, when rejected.
    pub rejected_reason: Option<String>,
}

impl From<ShiftExchange> for ExchangeInfo {
    fn from(exchange: ShiftExchange) -> Self {
        Self {
            exchange_id: exchange.exchange_id,
            requester_id: exchange.requester_id,
            target_id: exchange.target_id,
            requester_leg: exchange.requester_leg,
            target_leg: exchange.target_leg,
            status: exchange.status,
            reason: exchange.reason,
            approved_by: exchange.approved_by,
            rejected_reason: exchange.rejected_reason,
        }
    }
}

/// API response for a successful exchange approval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproveExchangeResponse {
    /// The approved exchange.
    pub exchange_id: i64,
    /// Advisory consecutive-hours warnings for both parties.
    pub warnings: ExchangeWarnings,
}

/// API response for a rejected exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectExchangeResponse {
    /// The rejected exchange.
    pub exchange_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a withdrawn exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelExchangeResponse {
    /// The withdrawn exchange.
    pub exchange_id: i64,
    /// A success message.
    pub message: String,
}
