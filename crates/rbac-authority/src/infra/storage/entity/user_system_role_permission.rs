use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// Grant of a system role to a user, unique on (user, system role).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_system_role_permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub namespace_id: Uuid,
    pub user_id: Uuid,
    pub system_role_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::system_role::Entity",
        from = "Column::SystemRoleId",
        to = "super::system_role::Column::Id"
    )]
    SystemRole,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::system_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SystemRole.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}
