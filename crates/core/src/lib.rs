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

mod error;
mod exchange;
mod replacement;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::CoreError;
pub use exchange::{
    ApprovePlan, ExchangeWarnings, NewExchange, RequestOutcome,
    decide_approve as decide_exchange_approve, decide_cancel as decide_exchange_cancel,
    decide_reject as decide_exchange_reject, decide_request, requester_incoming_obligation,
    target_incoming_obligation, without_outgoing_leg,
};
pub use replacement::{
    ApproveOutcome, AssignPlan, NewApplication, NewReplacement, UnassignPlan, candidate_obligation,
    create_replacement, decide_apply, decide_approve, decide_cancel, decide_reject_application,
    decide_unassign,
};
pub use state::{ExchangeLeg, Replacement, ReplacementApplication, ShiftExchange};
