//! Business logic: privilege resolution, access decisions, system-role
//! aggregation and provisioning.

pub mod decision;
pub mod error;
pub mod local_client;
pub mod repo;
pub mod service;
pub mod system_roles;

#[cfg(test)]
mod service_test;

pub use error::DomainError;
pub use local_client::LocalClient;
pub use service::AccessService;
pub use system_roles::SystemRoleService;
