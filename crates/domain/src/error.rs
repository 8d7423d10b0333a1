// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Cycle length must be at least one day.
    InvalidCycleLength {
        /// The invalid length value.
        length: u16,
    },
    /// Cycle day is outside the configured cycle.
    InvalidCycleDay {
        /// The invalid cycle day.
        day: u8,
        /// The maximum valid cycle day.
        max: u16,
    },
    /// Shift type string is not recognized.
    InvalidShiftType(String),
    /// Replacement status string is not recognized.
    InvalidReplacementStatus(String),
    /// Application status string is not recognized.
    InvalidApplicationStatus(String),
    /// Exchange status string is not recognized.
    InvalidExchangeStatus(String),
    /// Partial window is malformed.
    InvalidPartialWindow {
        /// Description of the validation error.
        reason: String,
    },
    /// The two legs of an exchange describe the same shift.
    IdenticalExchangeShifts {
        /// The shared shift date.
        shift_date: NaiveDate,
        /// The shared shift type.
        shift_type: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse a date or time from a string.
    ParseError {
        /// The invalid input string.
        input: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCycleLength { length } => {
                write!(f, "Invalid cycle length: {length}. Must be at least 1 day")
            }
            Self::InvalidCycleDay { day, max } => {
                write!(f, "Invalid cycle day: {day}. Must be between 1 and {max}")
            }
            Self::InvalidShiftType(s) => write!(f, "Invalid shift type: {s}"),
            Self::InvalidReplacementStatus(s) => write!(f, "Invalid replacement status: {s}"),
            Self::InvalidApplicationStatus(s) => write!(f, "Invalid application status: {s}"),
            Self::InvalidExchangeStatus(s) => write!(f, "Invalid exchange status: {s}"),
            Self::InvalidPartialWindow { reason } => {
                write!(f, "Invalid partial window: {reason}")
            }
            Self::IdenticalExchangeShifts {
                shift_date,
                shift_type,
            } => {
                write!(
                    f,
                    "Exchange legs are identical: both are a {shift_type} shift on {shift_date}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::ParseError { input, error } => {
                write!(f, "Failed to parse '{input}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
