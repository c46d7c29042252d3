//! Public contract for the RBAC authority.
//!
//! This crate defines the stable surface consumers depend on:
//!
//! - [`RbacAuthorityClient`] — the async client trait for access decisions,
//!   privilege listing, and system-permission queries
//! - Model types: [`AccessPrivilege`], [`AccessRequest`], [`SystemRole`],
//!   [`SystemPermission`]
//! - Error type: [`RbacError`]
//!
//! The implementation lives in the `rbac-authority` crate; other components
//! should only import from here.

pub mod api;
pub mod errors;
pub mod models;

pub use api::RbacAuthorityClient;
pub use errors::RbacError;
pub use models::{AccessPrivilege, AccessRequest, SystemPermission, SystemRole};
