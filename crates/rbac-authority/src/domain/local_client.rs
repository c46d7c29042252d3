//! In-process implementation of the public [`RbacAuthorityClient`] trait.

use std::sync::Arc;

use async_trait::async_trait;
use rbac_authority_sdk::{
    AccessPrivilege, AccessRequest, RbacAuthorityClient, RbacError, SystemPermission,
};
use uuid::Uuid;

use super::repo::{PrivilegeRepository, SystemRoleRepository};
use super::service::AccessService;
use super::system_roles::SystemRoleService;

/// Local client wrapping the domain services.
///
/// Consumers hold it as `Arc<dyn RbacAuthorityClient>`; domain errors are
/// mapped to the public [`RbacError`] taxonomy at this boundary.
pub struct LocalClient<PR: PrivilegeRepository, SR: SystemRoleRepository> {
    access: Arc<AccessService<PR>>,
    system_roles: Arc<SystemRoleService<SR>>,
}

impl<PR: PrivilegeRepository, SR: SystemRoleRepository> LocalClient<PR, SR> {
    pub fn new(access: Arc<AccessService<PR>>, system_roles: Arc<SystemRoleService<SR>>) -> Self {
        Self {
            access,
            system_roles,
        }
    }
}

#[async_trait]
impl<PR, SR> RbacAuthorityClient for LocalClient<PR, SR>
where
    PR: PrivilegeRepository + 'static,
    SR: SystemRoleRepository + 'static,
{
    async fn can_access(&self, request: &AccessRequest) -> Result<bool, RbacError> {
        self.access.can_access(request).await.map_err(Into::into)
    }

    async fn list_privileges(
        &self,
        namespace_id: Uuid,
    ) -> Result<Vec<AccessPrivilege>, RbacError> {
        self.access
            .list_privileges(namespace_id)
            .await
            .map_err(Into::into)
    }

    async fn system_permission(
        &self,
        user_id: Uuid,
        namespace_id: Uuid,
    ) -> Result<SystemPermission, RbacError> {
        self.system_roles
            .aggregate_permission(user_id, namespace_id)
            .await
            .map_err(Into::into)
    }
}
