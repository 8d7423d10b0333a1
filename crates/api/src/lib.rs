// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for FireShift.
//!
//! Handlers authorize the actor, delegate workflow decisions to the core
//! layer, commit plans through persistence, and translate every lower-layer
//! error into an [`ApiError`] so callers see one error contract.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod hooks;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, Role, require_admin, require_self_or_admin};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    apply_to_replacement, approve_exchange, approve_replacement, cancel_exchange,
    cancel_replacement, check_guard, complete_elapsed_replacements, create_replacement,
    get_cycle_config, get_cycle_day, get_exchange, get_replacement, list_exchanges_for_user,
    list_replacements, reject_application, reject_exchange, request_exchange, set_cycle_config,
    unassign_replacement,
};
pub use hooks::{LogHook, LogNotifier, Notifier, PostCommitHook, ScheduleEvent};
pub use request_response::{
    ApplyRequest, ApplyResponse, ApplicationInfo, ApproveExchangeResponse,
    ApproveReplacementRequest, ApproveReplacementResponse, CancelExchangeResponse,
    CancelReplacementResponse, CompleteElapsedResponse, CreateReplacementRequest, CycleConfigInfo,
    CycleDayResponse, ExchangeInfo, GetReplacementResponse, GuardCheckRequest, GuardCheckResponse,
    RejectApplicationResponse, RejectExchangeResponse, ReplacementInfo, RequestExchangeRequest,
    RequestExchangeResponse, SetCycleConfigRequest, UnassignResponse,
};
