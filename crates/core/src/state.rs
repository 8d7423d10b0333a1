// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workflow entities as hydrated from storage.
//!
//! These records are plain data: decision functions in [`crate::replacement`]
//! and [`crate::exchange`] inspect them and return typed transition plans,
//! they never mutate state in place.

use chrono::{NaiveDate, NaiveDateTime};
use fireshift_domain::{
    ApplicationStatus, ExchangeStatus, PartialWindow, ReplacementStatus, ShiftType,
};
use serde::{Deserialize, Serialize};

/// A replacement request for a single shift instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// The canonical numeric identifier assigned by the database.
    pub replacement_id: i64,
    /// The absent person whose shift needs covering. `None` for an extra
    /// staffing slot not tied to any rostered person.
    pub absent_user_id: Option<i64>,
    /// The team the shift belongs to.
    pub team_id: i64,
    /// The calendar date of the shift.
    pub shift_date: NaiveDate,
    /// The shape of the shift.
    pub shift_type: ShiftType,
    /// Optional narrowing when only part of the shift needs covering.
    pub partial: Option<PartialWindow>,
    /// Current lifecycle status.
    pub status: ReplacementStatus,
    /// The assigned substitute, when status is `Assigned`.
    pub assigned_user_id: Option<i64>,
    /// Free-text reason supplied by the creator.
    pub reason: Option<String>,
    /// Whether the opening of this slot has been announced to candidates.
    pub notification_sent: bool,
}

/// One candidate's application for a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementApplication {
    /// The canonical numeric identifier assigned by the database.
    pub application_id: i64,
    /// The replacement applied to.
    pub replacement_id: i64,
    /// The applicant.
    pub applicant_id: i64,
    /// Current application status.
    pub status: ApplicationStatus,
    /// When the application was submitted.
    pub applied_at: NaiveDateTime,
    /// The admin who approved or rejected this application, if reviewed.
    pub reviewed_by: Option<i64>,
    /// When the review happened.
    pub reviewed_at: Option<NaiveDateTime>,
}

/// One side of a proposed shift swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeLeg {
    /// The calendar date of the shift.
    pub shift_date: NaiveDate,
    /// The shape of the shift.
    pub shift_type: ShiftType,
    /// The team the shift belongs to.
    pub team_id: i64,
    /// Optional narrowing when only part of the shift is swapped.
    pub partial: Option<PartialWindow>,
}

/// A two-party shift exchange.
///
/// Each party gives away their own leg and takes over the other party's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftExchange {
    /// The canonical numeric identifier assigned by the database.
    pub exchange_id: i64,
    /// The person who initiated the swap.
    pub requester_id: i64,
    /// The person asked to swap.
    pub target_id: i64,
    /// The requester's own shift, given to the target on approval.
    pub requester_leg: ExchangeLeg,
    /// The target's shift, taken over by the requester on approval.
    pub target_leg: ExchangeLeg,
    /// Current lifecycle status.
    pub status: ExchangeStatus,
    /// Free-text reason supplied by the requester.
    pub reason: Option<String>,
    /// The admin who approved the swap, when status is `Approved`.
    pub approved_by: Option<i64>,
    /// Free-text grounds for rejection, when status is `Rejected`.
    pub rejected_reason: Option<String>,
}
