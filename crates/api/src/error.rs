// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fireshift_core::CoreError;
use fireshift_domain::DomainError;
use fireshift_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A workflow rule was violated.
    WorkflowRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation lost a race against a concurrent transition.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::WorkflowRuleViolation { rule, message } => {
                write!(f, "Workflow rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Conflict: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCycleLength { length } => ApiError::InvalidInput {
            field: String::from("cycle_length_days"),
            message: format!("Invalid cycle length: {length}. Must be at least 1 day"),
        },
        DomainError::InvalidCycleDay { day, max } => ApiError::InvalidInput {
            field: String::from("cycle_day"),
            message: format!("Invalid cycle day: {day}. Must be between 1 and {max}"),
        },
        DomainError::InvalidShiftType(value) => ApiError::InvalidInput {
            field: String::from("shift_type"),
            message: format!("Unknown shift type '{value}'"),
        },
        DomainError::InvalidReplacementStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown replacement status '{value}'"),
        },
        DomainError::InvalidApplicationStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown application status '{value}'"),
        },
        DomainError::InvalidExchangeStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown exchange status '{value}'"),
        },
        DomainError::InvalidPartialWindow { reason } => ApiError::InvalidInput {
            field: String::from("partial_window"),
            message: reason,
        },
        DomainError::IdenticalExchangeShifts {
            shift_date,
            shift_type,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("distinct_exchange_legs"),
            message: format!(
                "Both legs are the same {shift_type} shift on {shift_date}; an exchange must swap two different shifts"
            ),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::ParseError { input, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse '{input}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ReplacementNotOpen {
            replacement_id,
            status,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("replacement_open"),
            message: format!(
                "Replacement {replacement_id} is not open for applications (status: {status})"
            ),
        },
        CoreError::ReplacementNotAssigned {
            replacement_id,
            status,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("replacement_assigned"),
            message: format!(
                "Replacement {replacement_id} has no assigned substitute (status: {status})"
            ),
        },
        CoreError::ReplacementTerminal {
            replacement_id,
            status,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("replacement_not_terminal"),
            message: format!("Replacement {replacement_id} is already {status}"),
        },
        CoreError::DuplicateApplication {
            replacement_id,
            applicant_id,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("one_application_per_person"),
            message: format!(
                "User {applicant_id} has already applied to replacement {replacement_id}"
            ),
        },
        CoreError::ApplicationNotFound {
            replacement_id,
            applicant_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!(
                "No application from user {applicant_id} for replacement {replacement_id}"
            ),
        },
        CoreError::ApplicationNotPending {
            application_id,
            status,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("application_pending"),
            message: format!("Application {application_id} has already been reviewed ({status})"),
        },
        CoreError::ApprovedApplicationMissing { replacement_id } => ApiError::Internal {
            message: format!(
                "Replacement {replacement_id} is assigned but has no approved application"
            ),
        },
        CoreError::ExchangeNotPending {
            exchange_id,
            status,
        } => ApiError::WorkflowRuleViolation {
            rule: String::from("exchange_pending"),
            message: format!("Exchange {exchange_id} has already been resolved ({status})"),
        },
        CoreError::SelfExchange { user_id } => ApiError::WorkflowRuleViolation {
            rule: String::from("two_party_exchange"),
            message: format!("User {user_id} cannot exchange a shift with themselves"),
        },
        CoreError::NotExchangeRequester {
            exchange_id,
            user_id,
        } => ApiError::Unauthorized {
            action: format!("cancel exchange {exchange_id} as user {user_id}"),
            required_role: String::from("requester or admin"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Lost CAS races and uniqueness violations surface as conflicts; missing
/// records as not-found; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::StaleStatus { entity, id } => ApiError::Conflict {
            message: format!("{entity} {id} was modified concurrently; reload and retry"),
        },
        PersistenceError::UniqueViolation(message) => ApiError::Conflict { message },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
