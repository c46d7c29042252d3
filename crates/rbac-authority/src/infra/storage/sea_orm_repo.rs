//! `SeaORM` implementations of the repository traits.
//!
//! The privilege resolver is one explicit eleven-table join flattened into
//! [`PrivilegeRow`]; the row→model mapping is hand-written so it stays
//! auditable and testable independent of the driver.

use async_trait::async_trait;
use rbac_authority_sdk::{AccessPrivilege, SystemPermission, SystemRole};
use sea_orm::sea_query::{Expr, JoinType};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repo::{PrivilegeRepository, SystemRoleRepository};

use super::entity::{
    endpoint, namespace, path, role, role_endpoint_permission, system_role, target, target_group,
    target_group_belonging, user, user_group, user_group_belonging, user_group_role_assignment,
    user_system_role_permission,
};

/// One denormalized row of the flattened authorization graph.
#[derive(Debug, FromQueryResult)]
struct PrivilegeRow {
    user_id: Uuid,
    user_name: String,
    namespace_id: Uuid,
    namespace_name: String,
    user_group_id: Uuid,
    user_group_name: String,
    role_id: Uuid,
    role_name: String,
    path_id: Uuid,
    path_regex: String,
    method: String,
    target_group_id: Uuid,
    target_group_name: String,
    target_id: Uuid,
    object_id_regex: String,
}

impl From<PrivilegeRow> for AccessPrivilege {
    fn from(row: PrivilegeRow) -> Self {
        Self {
            user_id: row.user_id,
            user_name: row.user_name,
            namespace_id: row.namespace_id,
            namespace_name: row.namespace_name,
            user_group_id: row.user_group_id,
            user_group_name: row.user_group_name,
            role_id: row.role_id,
            role_name: row.role_name,
            path_id: row.path_id,
            path_regex: row.path_regex,
            method: row.method,
            target_group_id: row.target_group_id,
            target_group_name: row.target_group_name,
            target_id: row.target_id,
            object_id_regex: row.object_id_regex,
        }
    }
}

pub struct SeaOrmPrivilegeRepository;

impl SeaOrmPrivilegeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeaOrmPrivilegeRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// The full grant chain:
/// user → group belonging → group → role assignment → role →
/// endpoint permission → endpoint → { path, target group → belonging → target }.
///
/// Every hop is an inner join, so an incomplete chain produces no row. The
/// cross-namespace guards keep a chain from mixing grants of different
/// namespaces even if referential integrity is violated underneath us.
/// Ordering by (endpoint, target) keeps output deterministic for identical
/// stored state.
fn privilege_query() -> Select<user_group_belonging::Entity> {
    user_group_belonging::Entity::find()
        .select_only()
        .join(
            JoinType::InnerJoin,
            user_group_belonging::Relation::User.def(),
        )
        .join(
            JoinType::InnerJoin,
            user_group_belonging::Relation::UserGroup.def(),
        )
        .join(JoinType::InnerJoin, user_group::Relation::Namespace.def())
        .join(
            JoinType::InnerJoin,
            user_group::Relation::RoleAssignments.def(),
        )
        .join(
            JoinType::InnerJoin,
            user_group_role_assignment::Relation::Role.def(),
        )
        .join(
            JoinType::InnerJoin,
            role::Relation::EndpointPermissions.def(),
        )
        .join(
            JoinType::InnerJoin,
            role_endpoint_permission::Relation::Endpoint.def(),
        )
        .join(JoinType::InnerJoin, endpoint::Relation::Path.def())
        .join(JoinType::InnerJoin, endpoint::Relation::TargetGroup.def())
        .join(JoinType::InnerJoin, target_group::Relation::Belongings.def())
        .join(
            JoinType::InnerJoin,
            target_group_belonging::Relation::Target.def(),
        )
        .filter(
            Expr::col((
                user_group_role_assignment::Entity,
                user_group_role_assignment::Column::NamespaceId,
            ))
            .equals((
                user_group_belonging::Entity,
                user_group_belonging::Column::NamespaceId,
            )),
        )
        .filter(
            Expr::col((
                role_endpoint_permission::Entity,
                role_endpoint_permission::Column::NamespaceId,
            ))
            .equals((
                user_group_role_assignment::Entity,
                user_group_role_assignment::Column::NamespaceId,
            )),
        )
        .filter(
            Expr::col((
                target_group_belonging::Entity,
                target_group_belonging::Column::NamespaceId,
            ))
            .equals((endpoint::Entity, endpoint::Column::NamespaceId)),
        )
        .column_as(user::Column::Id, "user_id")
        .column_as(user::Column::Name, "user_name")
        .column_as(namespace::Column::Id, "namespace_id")
        .column_as(namespace::Column::Name, "namespace_name")
        .column_as(user_group::Column::Id, "user_group_id")
        .column_as(user_group::Column::Name, "user_group_name")
        .column_as(role::Column::Id, "role_id")
        .column_as(role::Column::Name, "role_name")
        .column_as(path::Column::Id, "path_id")
        .column_as(path::Column::Regex, "path_regex")
        .column_as(endpoint::Column::Method, "method")
        .column_as(target_group::Column::Id, "target_group_id")
        .column_as(target_group::Column::Name, "target_group_name")
        .column_as(target::Column::Id, "target_id")
        .column_as(target::Column::ObjectIdRegex, "object_id_regex")
        .order_by_asc(endpoint::Column::Id)
        .order_by_asc(target::Column::Id)
}

#[async_trait]
impl PrivilegeRepository for SeaOrmPrivilegeRepository {
    async fn find_by_namespace<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
    ) -> Result<Vec<AccessPrivilege>, DomainError> {
        let rows = privilege_query()
            .filter(user_group::Column::NamespaceId.eq(namespace_id))
            .into_model::<PrivilegeRow>()
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<AccessPrivilege>, DomainError> {
        let rows = privilege_query()
            .filter(user_group_belonging::Column::UserId.eq(user_id))
            .into_model::<PrivilegeRow>()
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

fn to_sdk_role(model: system_role::Model) -> SystemRole {
    SystemRole {
        id: model.id,
        namespace_id: model.namespace_id,
        name: model.name,
        permission: match model.permission {
            system_role::Permission::Read => SystemPermission::Read,
            system_role::Permission::Write => SystemPermission::Write,
        },
    }
}

pub struct SeaOrmSystemRoleRepository;

impl SeaOrmSystemRoleRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeaOrmSystemRoleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemRoleRepository for SeaOrmSystemRoleRepository {
    async fn find_by_namespace<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
    ) -> Result<Vec<SystemRole>, DomainError> {
        let roles = system_role::Entity::find()
            .filter(system_role::Column::NamespaceId.eq(namespace_id))
            .order_by_asc(system_role::Column::Id)
            .all(conn)
            .await?;
        Ok(roles.into_iter().map(to_sdk_role).collect())
    }

    async fn find_by_user_and_namespace<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        namespace_id: Uuid,
    ) -> Result<Vec<SystemRole>, DomainError> {
        let roles = system_role::Entity::find()
            .join(JoinType::InnerJoin, system_role::Relation::Grants.def())
            .filter(user_system_role_permission::Column::UserId.eq(user_id))
            .filter(system_role::Column::NamespaceId.eq(namespace_id))
            .order_by_asc(system_role::Column::Id)
            .all(conn)
            .await?;
        Ok(roles.into_iter().map(to_sdk_role).collect())
    }

    async fn find_system_role<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<SystemRole>, DomainError> {
        let role = system_role::Entity::find_by_id(id).one(conn).await?;
        Ok(role.map(to_sdk_role))
    }

    async fn insert_system_role<C: ConnectionTrait>(
        &self,
        conn: &C,
        role: &SystemRole,
    ) -> Result<(), DomainError> {
        let permission = match role.permission {
            SystemPermission::Read => system_role::Permission::Read,
            SystemPermission::Write => system_role::Permission::Write,
            SystemPermission::None => {
                return Err(DomainError::validation(
                    "permission",
                    "NONE is not a storable permission level",
                ));
            }
        };
        system_role::ActiveModel {
            id: ActiveValue::Set(role.id),
            namespace_id: ActiveValue::Set(role.namespace_id),
            name: ActiveValue::Set(role.name.clone()),
            permission: ActiveValue::Set(permission),
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
        }
        .insert(conn)
        .await?;
        Ok(())
    }

    async fn insert_grant<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<(), DomainError> {
        user_system_role_permission::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            namespace_id: ActiveValue::Set(namespace_id),
            user_id: ActiveValue::Set(user_id),
            system_role_id: ActiveValue::Set(system_role_id),
        }
        .insert(conn)
        .await?;
        Ok(())
    }

    async fn find_duplicate_grant<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<Option<Uuid>, DomainError> {
        let grant = user_system_role_permission::Entity::find()
            .filter(user_system_role_permission::Column::UserId.eq(user_id))
            .filter(user_system_role_permission::Column::SystemRoleId.eq(system_role_id))
            .one(conn)
            .await?;
        Ok(grant.map(|g| g.id))
    }

    async fn delete_grant_by_keys<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
        user_id: Uuid,
        system_role_id: Uuid,
    ) -> Result<u64, DomainError> {
        let result = user_system_role_permission::Entity::delete_many()
            .filter(user_system_role_permission::Column::NamespaceId.eq(namespace_id))
            .filter(user_system_role_permission::Column::UserId.eq(user_id))
            .filter(user_system_role_permission::Column::SystemRoleId.eq(system_role_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn namespace_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        namespace_id: Uuid,
    ) -> Result<bool, DomainError> {
        Ok(namespace::Entity::find_by_id(namespace_id)
            .one(conn)
            .await?
            .is_some())
    }

    async fn user_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<bool, DomainError> {
        Ok(user::Entity::find_by_id(user_id).one(conn).await?.is_some())
    }
}
