//! `SeaORM` entity definitions for the authorization graph.
//!
//! Every namespace-scoped table carries a `namespace_id` column; the
//! resolver's join additionally enforces that all hops of one grant chain
//! agree on it.

pub mod endpoint;
pub mod namespace;
pub mod path;
pub mod role;
pub mod role_endpoint_permission;
pub mod system_role;
pub mod target;
pub mod target_group;
pub mod target_group_belonging;
pub mod user;
pub mod user_group;
pub mod user_group_belonging;
pub mod user_group_role_assignment;
pub mod user_system_role_permission;
