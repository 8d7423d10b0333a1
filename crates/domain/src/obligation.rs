// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift obligation model and interval resolution.
//!
//! An obligation is any reason a specific person is scheduled to work a
//! specific time window: regular rotation, an assigned replacement, a direct
//! assignment, or one leg of an approved exchange. All four sources are a
//! single tagged union so interval math exists exactly once, regardless of
//! where an obligation came from.
//!
//! ## Invariants
//!
//! - Resolution never fails: a degenerate partial window (`start == end`)
//!   resolves to a zero-length interval rather than an error, so the merge
//!   sweep downstream stays total.
//! - `hours` is always >= 0 after the overnight correction.

use crate::types::{PartialWindow, ShiftType};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Where an obligation originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObligationSource {
    /// Derived from a rotation shift template and the cycle calendar.
    Regular {
        /// The shift template this instance was generated from.
        shift_id: i64,
    },
    /// An assigned replacement, attached to the substitute.
    ReplacementAssigned {
        /// The replacement record.
        replacement_id: i64,
    },
    /// An explicit override binding a user to a shift outside the rotation.
    DirectAssignment {
        /// The assignment record.
        assignment_id: i64,
    },
    /// One leg of an approved exchange, attached to the party who swapped in.
    ExchangeLeg {
        /// The exchange record.
        exchange_id: i64,
    },
}

/// A single reason a person works a specific shift on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftObligation {
    /// Where this obligation originates.
    pub source: ObligationSource,
    /// The person obligated to work.
    pub user_id: i64,
    /// The calendar date the shift starts on.
    pub date: NaiveDate,
    /// The shape of the shift.
    pub shift_type: ShiftType,
    /// Optional narrowing of the full shift window.
    pub partial: Option<PartialWindow>,
}

/// A concrete `[start, end)` datetime interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInterval {
    /// Interval start.
    pub start: NaiveDateTime,
    /// Interval end. `end >= start` always holds.
    pub end: NaiveDateTime,
}

impl ShiftInterval {
    /// Returns the interval length in fractional hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hours(&self) -> f64 {
        let minutes = self.end.signed_duration_since(self.start).num_minutes();
        minutes as f64 / 60.0
    }
}

/// Resolves one obligation to a concrete datetime interval.
///
/// The base window comes from the shift type; a partial window overrides it.
/// An end clock time numerically earlier than the start clock time spans the
/// interval into the next calendar day. `start == end` yields a zero-length
/// interval.
#[must_use]
pub fn resolve_interval(obligation: &ShiftObligation) -> ShiftInterval {
    let (start_time, end_time, crosses_midnight) = obligation.partial.map_or_else(
        || {
            (
                obligation.shift_type.start_time(),
                obligation.shift_type.end_time(),
                obligation.shift_type.crosses_midnight(),
            )
        },
        |window| (window.start, window.end, window.crosses_midnight()),
    );

    let start = attach(obligation.date, start_time);
    let end_date = if crosses_midnight {
        obligation
            .date
            .checked_add_days(Days::new(1))
            .unwrap_or(obligation.date)
    } else {
        obligation.date
    };
    let end = attach(end_date, end_time);

    ShiftInterval { start, end }
}

/// Resolves a batch of obligations, ordered by interval start.
#[must_use]
pub fn resolve_intervals(obligations: &[ShiftObligation]) -> Vec<ShiftInterval> {
    let mut intervals: Vec<ShiftInterval> = obligations.iter().map(resolve_interval).collect();
    intervals.sort_by_key(|interval| interval.start);
    intervals
}

fn attach(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}
