// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Post-commit notification hooks.
//!
//! Handlers emit a [`ScheduleEvent`] after a transition commits. Delivery is
//! strictly best-effort and happens outside the database transaction: a
//! failed or slow notification never rolls back a committed transition.

use tracing::info;

/// A schedule change worth telling somebody about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    /// A replacement was opened for a team's shift.
    ReplacementCreated {
        /// The new replacement.
        replacement_id: i64,
        /// The team whose shift needs covering.
        team_id: i64,
    },
    /// A candidate applied to cover a replacement.
    ApplicationReceived {
        /// The replacement applied to.
        replacement_id: i64,
        /// The applicant.
        applicant_id: i64,
    },
    /// A substitute was assigned.
    ReplacementAssigned {
        /// The replacement.
        replacement_id: i64,
        /// The assigned substitute.
        substitute_id: i64,
    },
    /// An assignment was reverted; the replacement is open again.
    ReplacementUnassigned {
        /// The replacement.
        replacement_id: i64,
    },
    /// A replacement was withdrawn.
    ReplacementCancelled {
        /// The replacement.
        replacement_id: i64,
    },
    /// An application was turned down.
    ApplicationRejected {
        /// The application.
        application_id: i64,
    },
    /// A shift exchange was proposed.
    ExchangeRequested {
        /// The new exchange.
        exchange_id: i64,
        /// The person asked to swap.
        target_id: i64,
    },
    /// An exchange was approved; both parties' schedules changed.
    ExchangeApproved {
        /// The exchange.
        exchange_id: i64,
    },
    /// An exchange was rejected.
    ExchangeRejected {
        /// The exchange.
        exchange_id: i64,
    },
    /// An exchange was withdrawn by its requester.
    ExchangeCancelled {
        /// The exchange.
        exchange_id: i64,
    },
}

/// Delivers schedule events to the people affected.
///
/// Implementations must be infallible from the caller's perspective; report
/// delivery problems through their own channels.
pub trait Notifier {
    /// Delivers one event.
    fn notify(&self, event: &ScheduleEvent);
}

/// A `Notifier` that writes events to the log.
///
/// The default in tests and in deployments without a messaging integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &ScheduleEvent) {
        info!("notification: {event:?}");
    }
}

/// Runs after a workflow transition has committed.
///
/// Used for side channels such as calendar sync or metrics export.
pub trait PostCommitHook {
    /// Called once per committed transition.
    fn after_commit(&self, event: &ScheduleEvent);
}

/// A `PostCommitHook` that writes events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook;

impl PostCommitHook for LogHook {
    fn after_commit(&self, event: &ScheduleEvent) {
        info!("committed: {event:?}");
    }
}
