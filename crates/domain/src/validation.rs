// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input validation applied before any write.

use crate::error::DomainError;
use crate::types::{PartialWindow, ShiftType};
use chrono::NaiveDate;

/// Yearly shift-exchange quota per requester.
///
/// A soft cap: requests beyond it surface a warning and require an explicit
/// override, they are not hard-blocked.
pub const EXCHANGE_QUOTA_PER_YEAR: u32 = 8;

/// Validates a partial window.
///
/// A zero-length window (`start == end`) is rejected here so the interval
/// resolver never receives one through the normal write path.
///
/// # Errors
///
/// Returns `DomainError::InvalidPartialWindow` if the window has zero
/// length.
pub fn validate_partial_window(window: &PartialWindow) -> Result<(), DomainError> {
    if window.is_empty() {
        return Err(DomainError::InvalidPartialWindow {
            reason: format!("start and end are both {}", window.start),
        });
    }
    Ok(())
}

/// Validates that the two legs of an exchange are not the same shift.
///
/// Two legs are identical when they share date, shift type, and team.
///
/// # Errors
///
/// Returns `DomainError::IdenticalExchangeShifts` if both legs describe the
/// same shift.
pub fn validate_exchange_legs_distinct(
    requester_leg: (NaiveDate, ShiftType, i64),
    target_leg: (NaiveDate, ShiftType, i64),
) -> Result<(), DomainError> {
    if requester_leg == target_leg {
        return Err(DomainError::IdenticalExchangeShifts {
            shift_date: requester_leg.0,
            shift_type: requester_leg.1.as_str().to_string(),
        });
    }
    Ok(())
}
