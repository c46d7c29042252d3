use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Namespaces {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserGroups {
    Table,
    Id,
    NamespaceId,
    Name,
}

#[derive(DeriveIden)]
enum UserGroupBelongings {
    Table,
    Id,
    NamespaceId,
    UserId,
    UserGroupId,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    NamespaceId,
    Name,
}

#[derive(DeriveIden)]
enum UserGroupRoleAssignments {
    Table,
    Id,
    NamespaceId,
    UserGroupId,
    RoleId,
}

#[derive(DeriveIden)]
enum Paths {
    Table,
    Id,
    NamespaceId,
    Regex,
}

#[derive(DeriveIden)]
enum TargetGroups {
    Table,
    Id,
    NamespaceId,
    Name,
}

#[derive(DeriveIden)]
enum Targets {
    Table,
    Id,
    NamespaceId,
    ObjectIdRegex,
}

#[derive(DeriveIden)]
enum TargetGroupBelongings {
    Table,
    Id,
    NamespaceId,
    TargetGroupId,
    TargetId,
}

#[derive(DeriveIden)]
enum Endpoints {
    Table,
    Id,
    NamespaceId,
    PathId,
    Method,
    TargetGroupId,
}

#[derive(DeriveIden)]
enum RoleEndpointPermissions {
    Table,
    Id,
    NamespaceId,
    RoleId,
    EndpointId,
}

#[derive(DeriveIden)]
enum SystemRoles {
    Table,
    Id,
    NamespaceId,
    Name,
    Permission,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserSystemRolePermissions {
    Table,
    Id,
    NamespaceId,
    UserId,
    SystemRoleId,
}

fn uuid_pk<T: IntoIden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().take()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Namespaces::Table)
                    .col(uuid_pk(Namespaces::Id))
                    .col(ColumnDef::new(Namespaces::Name).string().not_null())
                    .col(
                        ColumnDef::new(Namespaces::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(uuid_pk(Users::Id))
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserGroups::Table)
                    .col(uuid_pk(UserGroups::Id))
                    .col(ColumnDef::new(UserGroups::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(UserGroups::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserGroups::Table, UserGroups::NamespaceId)
                            .to(Namespaces::Table, Namespaces::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserGroupBelongings::Table)
                    .col(uuid_pk(UserGroupBelongings::Id))
                    .col(
                        ColumnDef::new(UserGroupBelongings::NamespaceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserGroupBelongings::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserGroupBelongings::UserGroupId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserGroupBelongings::Table, UserGroupBelongings::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserGroupBelongings::Table, UserGroupBelongings::UserGroupId)
                            .to(UserGroups::Table, UserGroups::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .col(uuid_pk(Roles::Id))
                    .col(ColumnDef::new(Roles::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(Roles::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Roles::Table, Roles::NamespaceId)
                            .to(Namespaces::Table, Namespaces::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserGroupRoleAssignments::Table)
                    .col(uuid_pk(UserGroupRoleAssignments::Id))
                    .col(
                        ColumnDef::new(UserGroupRoleAssignments::NamespaceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserGroupRoleAssignments::UserGroupId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserGroupRoleAssignments::RoleId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserGroupRoleAssignments::Table,
                                UserGroupRoleAssignments::UserGroupId,
                            )
                            .to(UserGroups::Table, UserGroups::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserGroupRoleAssignments::Table,
                                UserGroupRoleAssignments::RoleId,
                            )
                            .to(Roles::Table, Roles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Paths::Table)
                    .col(uuid_pk(Paths::Id))
                    .col(ColumnDef::new(Paths::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(Paths::Regex).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Paths::Table, Paths::NamespaceId)
                            .to(Namespaces::Table, Namespaces::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TargetGroups::Table)
                    .col(uuid_pk(TargetGroups::Id))
                    .col(ColumnDef::new(TargetGroups::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(TargetGroups::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TargetGroups::Table, TargetGroups::NamespaceId)
                            .to(Namespaces::Table, Namespaces::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Targets::Table)
                    .col(uuid_pk(Targets::Id))
                    .col(ColumnDef::new(Targets::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(Targets::ObjectIdRegex).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Targets::Table, Targets::NamespaceId)
                            .to(Namespaces::Table, Namespaces::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TargetGroupBelongings::Table)
                    .col(uuid_pk(TargetGroupBelongings::Id))
                    .col(
                        ColumnDef::new(TargetGroupBelongings::NamespaceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TargetGroupBelongings::TargetGroupId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TargetGroupBelongings::TargetId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                TargetGroupBelongings::Table,
                                TargetGroupBelongings::TargetGroupId,
                            )
                            .to(TargetGroups::Table, TargetGroups::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TargetGroupBelongings::Table, TargetGroupBelongings::TargetId)
                            .to(Targets::Table, Targets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Endpoints::Table)
                    .col(uuid_pk(Endpoints::Id))
                    .col(ColumnDef::new(Endpoints::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(Endpoints::PathId).uuid().not_null())
                    .col(ColumnDef::new(Endpoints::Method).string().not_null())
                    .col(ColumnDef::new(Endpoints::TargetGroupId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Endpoints::Table, Endpoints::PathId)
                            .to(Paths::Table, Paths::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Endpoints::Table, Endpoints::TargetGroupId)
                            .to(TargetGroups::Table, TargetGroups::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoleEndpointPermissions::Table)
                    .col(uuid_pk(RoleEndpointPermissions::Id))
                    .col(
                        ColumnDef::new(RoleEndpointPermissions::NamespaceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoleEndpointPermissions::RoleId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoleEndpointPermissions::EndpointId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                RoleEndpointPermissions::Table,
                                RoleEndpointPermissions::RoleId,
                            )
                            .to(Roles::Table, Roles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                RoleEndpointPermissions::Table,
                                RoleEndpointPermissions::EndpointId,
                            )
                            .to(Endpoints::Table, Endpoints::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemRoles::Table)
                    .col(uuid_pk(SystemRoles::Id))
                    .col(ColumnDef::new(SystemRoles::NamespaceId).uuid().not_null())
                    .col(ColumnDef::new(SystemRoles::Name).string().not_null())
                    .col(
                        ColumnDef::new(SystemRoles::Permission)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemRoles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SystemRoles::Table, SystemRoles::NamespaceId)
                            .to(Namespaces::Table, Namespaces::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSystemRolePermissions::Table)
                    .col(uuid_pk(UserSystemRolePermissions::Id))
                    .col(
                        ColumnDef::new(UserSystemRolePermissions::NamespaceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSystemRolePermissions::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSystemRolePermissions::SystemRoleId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserSystemRolePermissions::Table,
                                UserSystemRolePermissions::UserId,
                            )
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                UserSystemRolePermissions::Table,
                                UserSystemRolePermissions::SystemRoleId,
                            )
                            .to(SystemRoles::Table, SystemRoles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One system role per user at most
        manager
            .create_index(
                Index::create()
                    .name("ux_user_system_role")
                    .table(UserSystemRolePermissions::Table)
                    .col(UserSystemRolePermissions::UserId)
                    .col(UserSystemRolePermissions::SystemRoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_ugb_user")
                    .table(UserGroupBelongings::Table)
                    .col(UserGroupBelongings::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UserSystemRolePermissions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(SystemRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RoleEndpointPermissions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Endpoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TargetGroupBelongings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Targets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TargetGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Paths::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(UserGroupRoleAssignments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserGroupBelongings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Namespaces::Table).to_owned())
            .await
    }
}
