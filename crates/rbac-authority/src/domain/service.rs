use std::sync::Arc;

use rbac_authority_sdk::{AccessPrivilege, AccessRequest};
use sea_orm::DatabaseConnection;
use tracing::instrument;
use uuid::Uuid;

use super::decision;
use super::error::DomainError;
use super::repo::PrivilegeRepository;

/// Access decision service.
///
/// Stateless over a shared connection pool: facts are resolved fresh from the
/// store on every call, so decisions always reflect current state. No caching,
/// no staleness window.
pub struct AccessService<R: PrivilegeRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: PrivilegeRepository> AccessService<R> {
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    /// Decide whether the request is authorized.
    ///
    /// Total for well-formed requests; only store failures surface as errors.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Database` when the privilege store is
    /// unreachable.
    #[instrument(
        skip(self, request),
        fields(user_id = %request.user_id, namespace_id = %request.namespace_id, method = %request.method)
    )]
    pub async fn can_access(&self, request: &AccessRequest) -> Result<bool, DomainError> {
        let facts = self.repo.find_by_user(&self.db, request.user_id).await?;
        let allowed = decision::decide(request, &facts);
        tracing::debug!(facts = facts.len(), allowed, "access decision");
        Ok(allowed)
    }

    /// List every grant within a namespace, for audit.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Database` when the privilege store is
    /// unreachable.
    #[instrument(skip(self))]
    pub async fn list_privileges(
        &self,
        namespace_id: Uuid,
    ) -> Result<Vec<AccessPrivilege>, DomainError> {
        self.repo.find_by_namespace(&self.db, namespace_id).await
    }

    /// All grants reachable by a user across namespaces.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Database` when the privilege store is
    /// unreachable.
    #[instrument(skip(self))]
    pub async fn user_privileges(&self, user_id: Uuid) -> Result<Vec<AccessPrivilege>, DomainError> {
        self.repo.find_by_user(&self.db, user_id).await
    }
}
