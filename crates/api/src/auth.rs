// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity and authorization checks.

use crate::error::ApiError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: shift officers with scheduling authority.
    ///
    /// Admins may approve, reject, unassign, and cancel workflow records on
    /// anyone's behalf, and manage the rotation configuration.
    Admin,
    /// Firefighter role: regular rostered personnel.
    ///
    /// Firefighters act on their own schedule only: requesting replacements
    /// for their own shifts, applying as substitutes, and requesting or
    /// withdrawing their own exchanges.
    Firefighter,
}

impl Role {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Firefighter => "firefighter",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The actor's user ID.
    pub user_id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns whether this actor holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Requires the admin role.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the actor is not an admin.
pub fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
    if actor.is_admin() {
        return Ok(());
    }
    Err(ApiError::Unauthorized {
        action: action.to_string(),
        required_role: Role::Admin.as_str().to_string(),
    })
}

/// Requires that the actor is the subject user or an admin.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the actor is neither.
pub fn require_self_or_admin(
    actor: &AuthenticatedActor,
    subject_user_id: i64,
    action: &str,
) -> Result<(), ApiError> {
    if actor.is_admin() || actor.user_id == subject_user_id {
        return Ok(());
    }
    Err(ApiError::Unauthorized {
        action: action.to_string(),
        required_role: "admin (or acting on own schedule)".to_string(),
    })
}
