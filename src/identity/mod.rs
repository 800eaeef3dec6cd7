//! Authenticated-user identity for record stamping and scoping.
//!
//! Row ownership is never implied by an ambient session: every service
//! operation receives a [`UserContext`] and every repository call receives
//! the owning [`UserId`] explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of a user as issued by the external identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    ///
    /// An absent user is expressed with [`UserContext::anonymous`].
    #[expect(
        clippy::new_without_default,
        reason = "user ids are issued by the identity provider, not defaulted"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while resolving the acting user.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No user identity could be resolved from the session.
    #[error("user not authenticated")]
    NotAuthenticated,
}

/// Session-derived context describing who is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserContext {
    user_id: Option<UserId>,
}

impl UserContext {
    /// Context for a resolved, authenticated user.
    #[must_use]
    pub const fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Context for a session without a resolvable user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Returns the user identifier, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the user identifier or fails when the session is anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NotAuthenticated`] for anonymous contexts.
    pub const fn require_user(&self) -> Result<UserId, IdentityError> {
        match self.user_id {
            Some(user_id) => Ok(user_id),
            None => Err(IdentityError::NotAuthenticated),
        }
    }
}

impl From<UserId> for UserContext {
    fn from(user_id: UserId) -> Self {
        Self::authenticated(user_id)
    }
}
