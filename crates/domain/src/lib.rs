// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod consecutive;
mod cycle;
mod error;
mod obligation;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use consecutive::{
    ConsecutiveCheck, GUARD_WINDOW_DAYS, MAX_CONSECUTIVE_HOURS, MIN_REST_GAP_HOURS,
    check_consecutive_hours,
};
pub use cycle::{cycle_day_of, date_for_cycle_day};
pub use error::DomainError;
pub use obligation::{
    ObligationSource, ShiftInterval, ShiftObligation, resolve_interval, resolve_intervals,
};
pub use types::{
    ApplicationStatus, CycleConfig, ExchangeStatus, PartialWindow, ReplacementStatus,
    ShiftTemplate, ShiftType,
};
pub use validation::{
    EXCHANGE_QUOTA_PER_YEAR, validate_exchange_legs_distinct, validate_partial_window,
};
