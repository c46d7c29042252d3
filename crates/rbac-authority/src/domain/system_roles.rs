use std::sync::Arc;

use rbac_authority_sdk::{SystemPermission, SystemRole};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::repo::SystemRoleRepository;

/// Name of the READ system role provisioned for every new namespace.
pub const DEFAULT_READ_ROLE: &str = "namespace-read";
/// Name of the WRITE system role provisioned for every new namespace.
pub const DEFAULT_WRITE_ROLE: &str = "namespace-write";

/// System role aggregation and provisioning.
///
/// Aggregation is read-only; provisioning is the sole multi-write path and
/// runs inside one transaction so a crash can never leave a namespace with a
/// READ role but no WRITE role, or roles without the creator's grant.
pub struct SystemRoleService<R: SystemRoleRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: SystemRoleRepository> SystemRoleService<R> {
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    /// Maximum permission level over all system-role grants the user holds in
    /// the namespace; `None` when the user holds no grants there.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Database` when the store is unreachable.
    #[instrument(skip(self))]
    pub async fn aggregate_permission(
        &self,
        user_id: Uuid,
        namespace_id: Uuid,
    ) -> Result<SystemPermission, DomainError> {
        let roles = self
            .repo
            .find_by_user_and_namespace(&self.db, user_id, namespace_id)
            .await?;
        Ok(roles
            .iter()
            .map(|role| role.permission)
            .max()
            .unwrap_or(SystemPermission::None))
    }

    /// Provision the default system roles for a freshly created namespace:
    /// one READ role, one WRITE role, and a WRITE grant for the creator.
    ///
    /// Returns the two created roles, READ first.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the namespace or the creator does not exist (caller
    ///   contract violation)
    /// - `Database` on store failure; the transaction rolls back and no
    ///   partial provisioning is left behind
    #[instrument(skip(self))]
    pub async fn provision_defaults(
        &self,
        namespace_id: Uuid,
        creator_user_id: Uuid,
    ) -> Result<(SystemRole, SystemRole), DomainError> {
        let txn = self.db.begin().await?;

        if !self.repo.namespace_exists(&txn, namespace_id).await? {
            return Err(DomainError::not_found("namespace", namespace_id));
        }
        if !self.repo.user_exists(&txn, creator_user_id).await? {
            return Err(DomainError::not_found("user", creator_user_id));
        }

        let read_role = SystemRole {
            id: Uuid::new_v4(),
            namespace_id,
            name: DEFAULT_READ_ROLE.to_owned(),
            permission: SystemPermission::Read,
        };
        let write_role = SystemRole {
            id: Uuid::new_v4(),
            namespace_id,
            name: DEFAULT_WRITE_ROLE.to_owned(),
            permission: SystemPermission::Write,
        };

        self.repo.insert_system_role(&txn, &read_role).await?;
        self.repo.insert_system_role(&txn, &write_role).await?;
        self.repo
            .insert_grant(&txn, namespace_id, creator_user_id, write_role.id)
            .await?;

        txn.commit().await?;
        tracing::info!(%namespace_id, %creator_user_id, "provisioned default system roles");
        Ok((read_role, write_role))
    }

    /// Grant a system role to a user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the system role or user does not exist
    /// - `Validation` if the role belongs to a different namespace
    /// - `DuplicateGrant` if the user already holds this role
    /// - `Database` on store failure
    #[instrument(skip(self))]
    pub async fn grant(
        &self,
        namespace_id: Uuid,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<(), DomainError> {
        let role = self
            .repo
            .find_system_role(&self.db, system_role_id)
            .await?
            .ok_or_else(|| DomainError::not_found("system role", system_role_id))?;
        if role.namespace_id != namespace_id {
            return Err(DomainError::validation(
                "system_role_id",
                format!("system role {system_role_id} belongs to another namespace"),
            ));
        }
        if !self.repo.user_exists(&self.db, user_id).await? {
            return Err(DomainError::not_found("user", user_id));
        }
        if self
            .repo
            .find_duplicate_grant(&self.db, user_id, system_role_id)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_grant(user_id, system_role_id));
        }

        self.repo
            .insert_grant(&self.db, namespace_id, user_id, system_role_id)
            .await
    }

    /// Revoke a system role from a user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such grant exists
    /// - `Database` on store failure
    #[instrument(skip(self))]
    pub async fn revoke(
        &self,
        namespace_id: Uuid,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<(), DomainError> {
        let removed = self
            .repo
            .delete_grant_by_keys(&self.db, namespace_id, user_id, system_role_id)
            .await?;
        if removed == 0 {
            return Err(DomainError::not_found("system role grant", system_role_id));
        }
        Ok(())
    }

    /// List the system roles of a namespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Database` when the store is unreachable.
    #[instrument(skip(self))]
    pub async fn list_system_roles(
        &self,
        namespace_id: Uuid,
    ) -> Result<Vec<SystemRole>, DomainError> {
        self.repo.find_by_namespace(&self.db, namespace_id).await
    }
}
