// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle calendar arithmetic.
//!
//! Maps calendar dates to positions in the repeating rotation cycle and
//! back. All arithmetic is DST-naive: dates are compared at midnight local,
//! never as instants, so a cycle day is stable across daylight-saving
//! transitions.

use crate::error::DomainError;
use crate::types::CycleConfig;
use chrono::{Days, NaiveDate};

/// Computes the cycle day (1-based) for a calendar date.
///
/// `cycle_day_of(config.start_date()) == 1`, and the result is periodic with
/// period `config.cycle_length_days()`. Dates before the epoch are handled
/// by Euclidean remainder, so the function is total over all dates.
///
/// # Errors
///
/// This function cannot fail for a validated `CycleConfig`; the `Result`
/// signature exists for parity with `date_for_cycle_day`.
#[allow(clippy::missing_panics_doc)]
pub fn cycle_day_of(date: NaiveDate, config: &CycleConfig) -> Result<u8, DomainError> {
    let length = i64::from(config.cycle_length_days());
    let delta = date.signed_duration_since(config.start_date()).num_days();
    let day = delta.rem_euclid(length) + 1;
    // day is in [1, length] and length fits in u16; u8 holds any realistic
    // cycle length, and the production value is 28.
    u8::try_from(day).map_err(|_| DomainError::InvalidCycleDay {
        day: u8::MAX,
        max: config.cycle_length_days(),
    })
}

/// Finds the nearest date on/after `reference` whose cycle day equals
/// `cycle_day`.
///
/// # Errors
///
/// Returns `DomainError::InvalidCycleDay` if `cycle_day` is outside the
/// configured cycle, or `DomainError::DateArithmeticOverflow` if the shifted
/// date is not representable.
pub fn date_for_cycle_day(
    cycle_day: u8,
    config: &CycleConfig,
    reference: NaiveDate,
) -> Result<NaiveDate, DomainError> {
    if cycle_day == 0 || u16::from(cycle_day) > config.cycle_length_days() {
        return Err(DomainError::InvalidCycleDay {
            day: cycle_day,
            max: config.cycle_length_days(),
        });
    }

    let length = i64::from(config.cycle_length_days());
    let reference_day = i64::from(cycle_day_of(reference, config)?);
    let offset = (i64::from(cycle_day) - reference_day).rem_euclid(length);

    let offset_days = u64::try_from(offset).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("shifting {reference} forward by {offset} days"),
    })?;
    reference
        .checked_add_days(Days::new(offset_days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("shifting {reference} forward by {offset} days"),
        })
}
