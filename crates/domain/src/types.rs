// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Builds a whole-hour clock time.
///
/// All fixed shift boundaries are whole hours, so the fallback branch is
/// unreachable for the constants used in this crate.
fn hms(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// The three fixed shift shapes of the rotation.
///
/// Shift shapes are domain constants; there is no configurable shift
/// catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Day shift, 07:00-17:00 (10 hours).
    Day,
    /// Night shift, 17:00-07:00 next day (14 hours).
    Night,
    /// Full 24-hour shift, 07:00-07:00 next day.
    #[serde(rename = "full_24h")]
    Full24h,
}

impl ShiftType {
    /// Returns the base start clock time for this shift type.
    #[must_use]
    pub fn start_time(self) -> NaiveTime {
        match self {
            Self::Day | Self::Full24h => hms(7),
            Self::Night => hms(17),
        }
    }

    /// Returns the base end clock time for this shift type.
    ///
    /// For `Night` and `Full24h` the end clock time falls on the next
    /// calendar day.
    #[must_use]
    pub fn end_time(self) -> NaiveTime {
        match self {
            Self::Day => hms(17),
            Self::Night | Self::Full24h => hms(7),
        }
    }

    /// Returns whether the base window of this shift type crosses midnight.
    #[must_use]
    pub const fn crosses_midnight(self) -> bool {
        matches!(self, Self::Night | Self::Full24h)
    }

    /// Returns the string representation of this shift type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::Full24h => "full_24h",
        }
    }
}

impl FromStr for ShiftType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            "full_24h" => Ok(Self::Full24h),
            _ => Err(DomainError::InvalidShiftType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A partial sub-window narrowing a full shift window.
///
/// An end clock time numerically earlier than the start clock time means the
/// window spans into the next calendar day. `start == end` denotes a
/// zero-length window; it is rejected by upstream validation but resolved
/// gracefully by the interval resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialWindow {
    /// Window start clock time.
    pub start: NaiveTime,
    /// Window end clock time.
    pub end: NaiveTime,
}

impl PartialWindow {
    /// Creates a new `PartialWindow`.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Returns whether this window spans into the next calendar day.
    ///
    /// A zero-length window (`start == end`) does not cross midnight.
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Returns whether this window has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Lifecycle state of a replacement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementStatus {
    /// Accepting applications.
    #[default]
    Open,
    /// A substitute has been assigned.
    Assigned,
    /// The shift date has passed.
    Completed,
    /// Withdrawn before completion. Terminal.
    Cancelled,
}

impl ReplacementStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Open → Assigned (approve)
    /// - Assigned → Open (unassign)
    /// - Open or Assigned → Completed (shift date passed)
    /// - Open or Assigned → Cancelled
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Assigned)
                | (Self::Assigned, Self::Open)
                | (Self::Open | Self::Assigned, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl FromStr for ReplacementStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidReplacementStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReplacementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single candidate application for a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting review. The candidate pool.
    #[default]
    Pending,
    /// Chosen as the substitute. At most one per replacement.
    Approved,
    /// Turned down by an admin.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Pending applications may be approved or rejected; an approved
    /// application may be demoted back to pending when the replacement is
    /// unassigned.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Pending)
        )
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApplicationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a two-party shift exchange.
///
/// All states except `Pending` are terminal; an approved exchange is
/// immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    /// Awaiting admin approval.
    #[default]
    Pending,
    /// Approved; both parties' obligations are swapped.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// Withdrawn by the requester.
    Cancelled,
}

impl ExchangeStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected | Self::Cancelled)
        )
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl FromStr for ExchangeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidExchangeStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The rotation epoch configuration.
///
/// A singleton record defining the date from which cycle-day numbers are
/// computed. Admin-mutable, read-only to the scheduling core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    /// The epoch date; `cycle_day_of(start_date) == 1`.
    start_date: NaiveDate,
    /// Length of the repeating cycle in days (28 in production).
    cycle_length_days: u16,
    /// Whether the rotation is currently active.
    active: bool,
}

impl CycleConfig {
    /// Creates a new `CycleConfig`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCycleLength` if `cycle_length_days` is 0.
    pub const fn new(
        start_date: NaiveDate,
        cycle_length_days: u16,
        active: bool,
    ) -> Result<Self, DomainError> {
        if cycle_length_days == 0 {
            return Err(DomainError::InvalidCycleLength {
                length: cycle_length_days,
            });
        }
        Ok(Self {
            start_date,
            cycle_length_days,
            active,
        })
    }

    /// Returns the epoch date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the cycle length in days.
    #[must_use]
    pub const fn cycle_length_days(&self) -> u16 {
        self.cycle_length_days
    }

    /// Returns whether the rotation is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A recurring rotation slot for a team.
///
/// Combined with `CycleConfig`, a template yields a concrete shift instance
/// on every date whose cycle day matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the template has not been persisted yet.
    shift_id: Option<i64>,
    /// The team this slot belongs to.
    team_id: i64,
    /// Position in the repeating cycle (1-based).
    cycle_day: u8,
    /// The shape of the shift.
    shift_type: ShiftType,
}

impl ShiftTemplate {
    /// Creates a new `ShiftTemplate` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCycleDay` if `cycle_day` is outside
    /// `[1, cycle_length_days]`.
    pub const fn new(
        team_id: i64,
        cycle_day: u8,
        shift_type: ShiftType,
        cycle_length_days: u16,
    ) -> Result<Self, DomainError> {
        if cycle_day == 0 || cycle_day as u16 > cycle_length_days {
            return Err(DomainError::InvalidCycleDay {
                day: cycle_day,
                max: cycle_length_days,
            });
        }
        Ok(Self {
            shift_id: None,
            team_id,
            cycle_day,
            shift_type,
        })
    }

    /// Creates a `ShiftTemplate` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        shift_id: i64,
        team_id: i64,
        cycle_day: u8,
        shift_type: ShiftType,
    ) -> Self {
        Self {
            shift_id: Some(shift_id),
            team_id,
            cycle_day,
            shift_type,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn shift_id(&self) -> Option<i64> {
        self.shift_id
    }

    /// Returns the team this slot belongs to.
    #[must_use]
    pub const fn team_id(&self) -> i64 {
        self.team_id
    }

    /// Returns the 1-based cycle day.
    #[must_use]
    pub const fn cycle_day(&self) -> u8 {
        self.cycle_day
    }

    /// Returns the shift shape.
    #[must_use]
    pub const fn shift_type(&self) -> ShiftType {
        self.shift_type
    }
}
