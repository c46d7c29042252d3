//! Public error types for the RBAC authority.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can be returned by the [`crate::RbacAuthorityClient`].
#[derive(Error, Debug, Clone)]
pub enum RbacError {
    /// Referenced entity (user, namespace, role, system role) was not found.
    #[error("Resource not found: {id}")]
    NotFound { id: Uuid },

    /// A duplicate unique grant was rejected.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Access denied (authorization failure).
    #[error("Access denied")]
    Forbidden,

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl RbacError {
    /// Create a `NotFound` error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Create a Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a Forbidden error.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    /// Create an Internal error.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
