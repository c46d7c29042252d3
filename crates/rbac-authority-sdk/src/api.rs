//! Public API trait for the RBAC authority.
//!
//! This trait defines the interface consumers use to ask access-control
//! questions. The authority implements it and owns all resolution against
//! the privilege store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RbacError;
use crate::models::{AccessPrivilege, AccessRequest, SystemPermission};

/// Client trait for the RBAC authority.
///
/// ```ignore
/// let authority: Arc<dyn RbacAuthorityClient> = ...;
///
/// let allowed = authority
///     .can_access(&AccessRequest {
///         user_id,
///         namespace_id,
///         path: "/user-service/v1/users".to_owned(),
///         method: "GET".to_owned(),
///         object_id: "object-id-1".to_owned(),
///     })
///     .await?;
/// ```
#[async_trait]
pub trait RbacAuthorityClient: Send + Sync {
    /// Decide whether the request is authorized.
    ///
    /// Total for well-formed requests: returns `Ok(true)` or `Ok(false)`.
    ///
    /// # Errors
    ///
    /// - `Internal` if the privilege store is unreachable
    async fn can_access(&self, request: &AccessRequest) -> Result<bool, RbacError>;

    /// List every grant within a namespace, for audit.
    ///
    /// An unknown or empty namespace yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// - `Internal` if the privilege store is unreachable
    async fn list_privileges(&self, namespace_id: Uuid)
    -> Result<Vec<AccessPrivilege>, RbacError>;

    /// Aggregate the user's administrative permission within a namespace.
    ///
    /// Returns the maximum level over all held system-role grants;
    /// `SystemPermission::None` when the user holds none.
    ///
    /// # Errors
    ///
    /// - `Internal` if the privilege store is unreachable
    async fn system_permission(
        &self,
        user_id: Uuid,
        namespace_id: Uuid,
    ) -> Result<SystemPermission, RbacError>;
}
