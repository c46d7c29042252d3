use rbac_authority_sdk::RbacError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("User {user_id} already holds system role {system_role_id}")]
    DuplicateGrant {
        user_id: Uuid,
        system_role_id: Uuid,
    },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error")]
    Internal,
}

impl DomainError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub fn duplicate_grant(user_id: Uuid, system_role_id: Uuid) -> Self {
        Self::DuplicateGrant {
            user_id,
            system_role_id,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        Self::database(e.to_string())
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for RbacError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { id, .. } => RbacError::not_found(id),
            DomainError::DuplicateGrant {
                user_id,
                system_role_id,
            } => RbacError::conflict(format!(
                "user {user_id} already holds system role {system_role_id}"
            )),
            DomainError::Validation { field, message } => {
                RbacError::validation(format!("{field}: {message}"))
            }
            DomainError::Database { .. } | DomainError::Internal => RbacError::internal(),
        }
    }
}
