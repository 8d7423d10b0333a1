// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fireshift_domain::DomainError;

/// Errors that can occur while deciding a workflow transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain validation rule was violated.
    DomainViolation(DomainError),
    /// The replacement is not accepting applications.
    ReplacementNotOpen {
        /// The replacement involved.
        replacement_id: i64,
        /// Its current status string.
        status: String,
    },
    /// The replacement has no assigned substitute.
    ReplacementNotAssigned {
        /// The replacement involved.
        replacement_id: i64,
        /// Its current status string.
        status: String,
    },
    /// The replacement has already reached a terminal status.
    ReplacementTerminal {
        /// The replacement involved.
        replacement_id: i64,
        /// Its current status string.
        status: String,
    },
    /// The applicant already has an application for this replacement.
    DuplicateApplication {
        /// The replacement involved.
        replacement_id: i64,
        /// The applicant.
        applicant_id: i64,
    },
    /// No application from this applicant exists for the replacement.
    ApplicationNotFound {
        /// The replacement involved.
        replacement_id: i64,
        /// The applicant.
        applicant_id: i64,
    },
    /// The application is not pending review.
    ApplicationNotPending {
        /// The application involved.
        application_id: i64,
        /// Its current status string.
        status: String,
    },
    /// An assigned replacement carries no approved application.
    ApprovedApplicationMissing {
        /// The replacement involved.
        replacement_id: i64,
    },
    /// The exchange is no longer pending.
    ExchangeNotPending {
        /// The exchange involved.
        exchange_id: i64,
        /// Its current status string.
        status: String,
    },
    /// Both exchange parties are the same person.
    SelfExchange {
        /// The user on both sides.
        user_id: i64,
    },
    /// Only the requester may withdraw a pending exchange.
    NotExchangeRequester {
        /// The exchange involved.
        exchange_id: i64,
        /// The user who attempted the withdrawal.
        user_id: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(e) => write!(f, "Domain validation failed: {e}"),
            Self::ReplacementNotOpen {
                replacement_id,
                status,
            } => {
                write!(
                    f,
                    "Replacement {replacement_id} is not open for applications (status: {status})"
                )
            }
            Self::ReplacementNotAssigned {
                replacement_id,
                status,
            } => {
                write!(
                    f,
                    "Replacement {replacement_id} has no assigned substitute (status: {status})"
                )
            }
            Self::ReplacementTerminal {
                replacement_id,
                status,
            } => {
                write!(
                    f,
                    "Replacement {replacement_id} is already {status} and cannot change"
                )
            }
            Self::DuplicateApplication {
                replacement_id,
                applicant_id,
            } => {
                write!(
                    f,
                    "User {applicant_id} has already applied to replacement {replacement_id}"
                )
            }
            Self::ApplicationNotFound {
                replacement_id,
                applicant_id,
            } => {
                write!(
                    f,
                    "No application from user {applicant_id} for replacement {replacement_id}"
                )
            }
            Self::ApplicationNotPending {
                application_id,
                status,
            } => {
                write!(
                    f,
                    "Application {application_id} is not pending review (status: {status})"
                )
            }
            Self::ApprovedApplicationMissing { replacement_id } => {
                write!(
                    f,
                    "Replacement {replacement_id} is assigned but has no approved application"
                )
            }
            Self::ExchangeNotPending {
                exchange_id,
                status,
            } => {
                write!(
                    f,
                    "Exchange {exchange_id} is no longer pending (status: {status})"
                )
            }
            Self::SelfExchange { user_id } => {
                write!(f, "User {user_id} cannot exchange a shift with themselves")
            }
            Self::NotExchangeRequester {
                exchange_id,
                user_id,
            } => {
                write!(
                    f,
                    "User {user_id} is not the requester of exchange {exchange_id}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(e: DomainError) -> Self {
        Self::DomainViolation(e)
    }
}
