// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consecutive working hours guard.
//!
//! Answers "would this new obligation push a person over 38 consecutive
//! working hours?" by merging their resolved intervals with an 8-hour rest
//! gap rule. Gaps shorter than the rest threshold join adjacent intervals
//! into one consecutive run regardless of which obligation source they came
//! from.
//!
//! The guard is advisory and side-effect-free: callers decide whether to
//! block, warn, or proceed with an explicit override.

use crate::obligation::{ShiftObligation, resolve_interval};
use chrono::Days;
use serde::{Deserialize, Serialize};

/// Maximum allowed consecutive working hours.
pub const MAX_CONSECUTIVE_HOURS: f64 = 38.0;

/// Minimum rest gap in hours; shorter gaps are treated as continuous duty.
pub const MIN_REST_GAP_HOURS: f64 = 8.0;

/// Days searched on each side of the candidate date.
///
/// Wide enough to catch any chain that could include the candidate given
/// the fixed shift shapes and rest threshold. If shift durations or the
/// rest gap ever become configurable this must be derived from
/// `MAX_CONSECUTIVE_HOURS / MIN_REST_GAP_HOURS` instead.
pub const GUARD_WINDOW_DAYS: u64 = 2;

/// Result of a consecutive-hours check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsecutiveCheck {
    /// Whether the longest run exceeds [`MAX_CONSECUTIVE_HOURS`].
    pub exceeds: bool,
    /// Length of the longest consecutive run, rounded to one decimal.
    pub total_hours: f64,
}

/// Checks whether adding `candidate` to a person's schedule produces a
/// consecutive run longer than [`MAX_CONSECUTIVE_HOURS`].
///
/// `existing` is the person's full obligation set around the candidate
/// date; obligations outside the ±[`GUARD_WINDOW_DAYS`] window are ignored,
/// so callers may pass a wider range than strictly needed.
#[must_use]
pub fn check_consecutive_hours(
    existing: &[ShiftObligation],
    candidate: &ShiftObligation,
) -> ConsecutiveCheck {
    let window_start = candidate
        .date
        .checked_sub_days(Days::new(GUARD_WINDOW_DAYS))
        .unwrap_or(candidate.date);
    let window_end = candidate
        .date
        .checked_add_days(Days::new(GUARD_WINDOW_DAYS))
        .unwrap_or(candidate.date);

    let mut intervals: Vec<_> = existing
        .iter()
        .filter(|obligation| obligation.date >= window_start && obligation.date <= window_end)
        .map(resolve_interval)
        .collect();
    intervals.push(resolve_interval(candidate));
    intervals.sort_by_key(|interval| interval.start);

    let mut max_run_hours: f64 = 0.0;
    let mut run_hours: f64 = 0.0;
    let mut run_end: Option<chrono::NaiveDateTime> = None;

    for interval in intervals {
        match run_end {
            None => {
                run_hours = interval.hours();
                run_end = Some(interval.end);
            }
            Some(current_end) => {
                let gap_minutes = interval
                    .start
                    .signed_duration_since(current_end)
                    .num_minutes();
                #[allow(clippy::cast_precision_loss)]
                let gap_hours = gap_minutes as f64 / 60.0;

                if gap_hours < MIN_REST_GAP_HOURS {
                    run_hours += interval.hours();
                    run_end = Some(current_end.max(interval.end));
                } else {
                    max_run_hours = max_run_hours.max(run_hours);
                    run_hours = interval.hours();
                    run_end = Some(interval.end);
                }
            }
        }
    }
    max_run_hours = max_run_hours.max(run_hours);

    // The threshold comparison uses the exact run length; rounding is for
    // display only and must not mask a breach just under the 0.05h step.
    ConsecutiveCheck {
        exceeds: max_run_hours > MAX_CONSECUTIVE_HOURS,
        total_hours: (max_run_hours * 10.0).round() / 10.0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::obligation::ObligationSource;
    use crate::types::{PartialWindow, ShiftType};
    use chrono::{NaiveDate, NaiveTime};

    fn obligation(day: u32, shift_type: ShiftType) -> ShiftObligation {
        ShiftObligation {
            source: ObligationSource::Regular { shift_id: 1 },
            user_id: 7,
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            shift_type,
            partial: None,
        }
    }

    fn partial(day: u32, shift_type: ShiftType, start: (u32, u32), end: (u32, u32)) -> ShiftObligation {
        ShiftObligation {
            partial: Some(PartialWindow::new(
                NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
                NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            )),
            ..obligation(day, shift_type)
        }
    }

    #[test]
    fn test_single_shift_never_exceeds() {
        let check = check_consecutive_hours(&[], &obligation(10, ShiftType::Full24h));
        assert!(!check.exceeds);
        assert!((check.total_hours - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rest_gap_prevents_merge() {
        // Day shifts on consecutive days: 17:00 -> 07:00 is a 14h gap.
        let existing = vec![
            obligation(9, ShiftType::Day),
            obligation(11, ShiftType::Day),
        ];
        let check = check_consecutive_hours(&existing, &obligation(10, ShiftType::Day));
        assert!(!check.exceeds);
        assert!((check.total_hours - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_24h_back_to_back_with_long_gaps() {
        // 24h shifts every other day: summed hours exceed 38 but each run
        // is a single shift because the gaps are 24h.
        let existing = vec![
            obligation(8, ShiftType::Full24h),
            obligation(12, ShiftType::Full24h),
        ];
        let check = check_consecutive_hours(&existing, &obligation(10, ShiftType::Full24h));
        assert!(!check.exceeds);
        assert!((check.total_hours - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_day_night_day_chain_is_34_hours() {
        // Day 07-17, Night 17-07 (zero gap), Day 07-17 (zero gap): one run.
        let existing = vec![
            obligation(10, ShiftType::Day),
            obligation(10, ShiftType::Night),
        ];
        let check = check_consecutive_hours(&existing, &obligation(11, ShiftType::Day));
        assert!(!check.exceeds);
        assert!((check.total_hours - 34.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extending_chain_past_threshold_exceeds() {
        // The 34h chain plus one more Day shift joined by a <8h gap.
        let existing = vec![
            obligation(10, ShiftType::Day),
            obligation(10, ShiftType::Night),
            obligation(11, ShiftType::Day),
        ];
        // Night partial 22:00-06:00 the same evening: gap 17:00 -> 22:00 is 5h.
        let candidate = partial(11, ShiftType::Night, (22, 0), (6, 0));
        let check = check_consecutive_hours(&existing, &candidate);
        assert!(check.exceeds);
        assert!((check.total_hours - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_obligations_outside_window_ignored() {
        // A chain 5 days away cannot affect the candidate.
        let existing = vec![
            obligation(20, ShiftType::Full24h),
            obligation(21, ShiftType::Full24h),
        ];
        let check = check_consecutive_hours(&existing, &obligation(10, ShiftType::Day));
        assert!(!check.exceeds);
        assert!((check.total_hours - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sources_merge_uniformly() {
        // A replacement and an exchange leg merge with rotation shifts the
        // same way regular shifts do.
        let mut replacement = obligation(10, ShiftType::Night);
        replacement.source = ObligationSource::ReplacementAssigned { replacement_id: 4 };
        let mut leg = obligation(11, ShiftType::Day);
        leg.source = ObligationSource::ExchangeLeg { exchange_id: 9 };

        let existing = vec![replacement, leg];
        let check = check_consecutive_hours(&existing, &obligation(10, ShiftType::Day));
        assert!((check.total_hours - 34.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_length_interval_does_not_break_sweep() {
        let degenerate = partial(10, ShiftType::Day, (9, 0), (9, 0));
        let check = check_consecutive_hours(&[degenerate], &obligation(10, ShiftType::Day));
        assert!(!check.exceeds);
        assert!((check.total_hours - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exceeds_uses_exact_hours_at_rounding_boundary() {
        // Full24h ending 07:00 chained zero-gap into 07:00-21:02 is a
        // 38h02m run. It rounds down to 38.0 for display but is over the
        // threshold and must be flagged.
        let existing = vec![obligation(10, ShiftType::Full24h)];
        let candidate = partial(11, ShiftType::Day, (7, 0), (21, 2));
        let check = check_consecutive_hours(&existing, &candidate);
        assert!(check.exceeds);
        assert!((check.total_hours - 38.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_hours_rounded_to_one_decimal() {
        // 07:00-15:10 is 8.1666... hours.
        let candidate = partial(10, ShiftType::Day, (7, 0), (15, 10));
        let check = check_consecutive_hours(&[], &candidate);
        assert!((check.total_hours - 8.2).abs() < f64::EPSILON);
    }
}
