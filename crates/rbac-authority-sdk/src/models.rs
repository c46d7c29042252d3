//! Domain models shared between the authority and its consumers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One flattened grant row from the authorization graph.
///
/// A privilege fact states: *this user, via this group, via this role, may
/// call this endpoint (method + path pattern) against objects matching this
/// target pattern*. Facts are derived fresh from the store on every
/// resolution; they have no identity of their own and are never persisted.
///
/// Multiple facts for the same user are expected and OR-composed: any single
/// matching fact grants access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPrivilege {
    pub user_id: Uuid,
    pub user_name: String,
    pub namespace_id: Uuid,
    pub namespace_name: String,
    pub user_group_id: Uuid,
    pub user_group_name: String,
    pub role_id: Uuid,
    pub role_name: String,
    pub path_id: Uuid,
    /// Regular expression matched against the full request path.
    pub path_regex: String,
    /// Literal HTTP verb or an alternation such as `(GET|POST)`.
    pub method: String,
    pub target_group_id: Uuid,
    pub target_group_name: String,
    pub target_id: Uuid,
    /// Pattern over the identifier of the object being acted upon.
    pub object_id_regex: String,
}

/// An access decision query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub user_id: Uuid,
    pub namespace_id: Uuid,
    pub path: String,
    pub method: String,
    pub object_id: String,
}

/// Coarse administrative permission level, totally ordered.
///
/// `None < Read < Write`. Stored system roles only ever carry `Read` or
/// `Write`; `None` is the aggregation result for a user holding no grants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemPermission {
    #[default]
    None,
    Read,
    Write,
}

/// A namespace-scoped administrative capability, independent of the
/// role/endpoint grant graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRole {
    pub id: Uuid,
    pub namespace_id: Uuid,
    pub name: String,
    pub permission: SystemPermission,
}
