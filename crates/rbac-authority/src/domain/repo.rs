//! Repository traits over the privilege fact store.
//!
//! Methods are generic over [`ConnectionTrait`] so the same repository code
//! runs against a plain connection or inside a transaction.

use async_trait::async_trait;
use rbac_authority_sdk::{AccessPrivilege, SystemRole};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::error::DomainError;

/// Read side of the flattened authorization graph.
///
/// Both queries return denormalized grant rows; an unknown user or namespace
/// yields an empty vector, never an error. Only store failures surface.
#[async_trait]
pub trait PrivilegeRepository: Send + Sync {
    /// All grants within a namespace, for listing and audit.
    async fn find_by_namespace<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
    ) -> Result<Vec<AccessPrivilege>, DomainError>;

    /// All grants reachable by a user, across every namespace they belong to.
    ///
    /// One row per distinct (group, role, endpoint, target) combination.
    /// Duplicate grants reaching the same endpoint/target through different
    /// paths are preserved; matching is existential so deduplication would
    /// change nothing and is not worth the pass.
    async fn find_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<AccessPrivilege>, DomainError>;
}

/// Store surface for system roles and their grants.
#[async_trait]
pub trait SystemRoleRepository: Send + Sync {
    async fn find_by_namespace<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
    ) -> Result<Vec<SystemRole>, DomainError>;

    /// System roles held by the user within the namespace.
    async fn find_by_user_and_namespace<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        namespace_id: Uuid,
    ) -> Result<Vec<SystemRole>, DomainError>;

    async fn find_system_role<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<SystemRole>, DomainError>;

    /// Persist a new system role. Rejects `SystemPermission::None`, which is
    /// an aggregation result and never a stored level.
    async fn insert_system_role<C: ConnectionTrait>(
        &self,
        conn: &C,
        role: &SystemRole,
    ) -> Result<(), DomainError>;

    async fn insert_grant<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<(), DomainError>;

    /// Id of an existing grant for (user, system role), if any.
    async fn find_duplicate_grant<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<Option<Uuid>, DomainError>;

    /// Delete a grant by its composite keys; returns the number of rows
    /// removed.
    async fn delete_grant_by_keys<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<u64, DomainError>;

    async fn namespace_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
    ) -> Result<bool, DomainError>;

    async fn user_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<bool, DomainError>;
}
