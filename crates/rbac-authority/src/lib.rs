//! Namespace-scoped RBAC authority.
//!
//! Stores who (users, user groups) holds which roles, which roles are
//! granted which endpoint permissions, and decides at request time whether a
//! `(user, namespace, path, method, object id)` tuple is authorized. A
//! parallel, coarser-grained system role (`NONE`/`READ`/`WRITE`) per
//! namespace gates administrative operations.
//!
//! ## Architecture
//!
//! This crate follows clean architecture with strict layering:
//!
//! ### Contract layer (`rbac-authority-sdk`)
//! Public models ([`AccessPrivilege`], [`AccessRequest`], [`SystemRole`],
//! [`SystemPermission`]), the [`RbacAuthorityClient`] trait, and
//! [`RbacError`]. Consumers depend only on the SDK.
//!
//! ### Domain layer (`domain`)
//! - `decision` — the pure access decision engine (OR across facts, AND
//!   across dimensions, anchored regex matching)
//! - `service` — [`AccessService`]: resolves a caller's privilege facts and
//!   applies the decision engine
//! - `system_roles` — [`SystemRoleService`]: permission aggregation and
//!   transactional default-role provisioning
//! - `repo` — repository traits; the domain never touches `SeaORM` directly
//!
//! ### Infrastructure layer (`infra::storage`)
//! `SeaORM` entities for the authorization graph, schema migrations, and the
//! repository implementations. The privilege resolver is a single explicit
//! multi-table join flattened into denormalized rows at this boundary.
//!
//! ### Identity (`identity`)
//! Bearer-token issuance/verification; verification failure is never a
//! silent allow.

// === PUBLIC API (from SDK) ===
pub use rbac_authority_sdk::{
    AccessPrivilege, AccessRequest, RbacAuthorityClient, RbacError, SystemPermission, SystemRole,
};

pub mod config;
pub mod domain;
pub mod identity;
pub mod infra;

pub use domain::{AccessService, DomainError, LocalClient, SystemRoleService};
