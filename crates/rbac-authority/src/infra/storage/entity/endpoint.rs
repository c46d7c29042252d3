use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// A callable surface: method pattern + path pattern + target group.
///
/// `method` is either a literal HTTP verb or an alternation regex such as
/// `(GET|POST)`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "endpoints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub namespace_id: Uuid,
    pub path_id: Uuid,
    pub method: String,
    pub target_group_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::namespace::Entity",
        from = "Column::NamespaceId",
        to = "super::namespace::Column::Id"
    )]
    Namespace,
    #[sea_orm(
        belongs_to = "super::path::Entity",
        from = "Column::PathId",
        to = "super::path::Column::Id"
    )]
    Path,
    #[sea_orm(
        belongs_to = "super::target_group::Entity",
        from = "Column::TargetGroupId",
        to = "super::target_group::Column::Id"
    )]
    TargetGroup,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::path::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Path.def()
    }
}

impl Related<super::target_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetGroup.def()
    }
}
