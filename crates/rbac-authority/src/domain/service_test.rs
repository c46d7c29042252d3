//! Integration tests for the access and system-role services.
//!
//! These tests run against an in-memory `SQLite` database with the real
//! migrations applied, seeding the authorization graph through the entities.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ActiveValue, ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use rbac_authority_sdk::{AccessRequest, SystemPermission};

use crate::domain::error::DomainError;
use crate::domain::service::AccessService;
use crate::domain::system_roles::{DEFAULT_READ_ROLE, DEFAULT_WRITE_ROLE, SystemRoleService};
use crate::infra::storage::entity::{
    endpoint, namespace, path, role, role_endpoint_permission, target, target_group,
    target_group_belonging, user, user_group, user_group_belonging, user_group_role_assignment,
};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::{SeaOrmPrivilegeRepository, SeaOrmSystemRoleRepository};

/// In-memory database with migrations applied. One connection, so every
/// statement sees the same database.
async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).min_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn access_service(db: &DatabaseConnection) -> AccessService<SeaOrmPrivilegeRepository> {
    AccessService::new(db.clone(), Arc::new(SeaOrmPrivilegeRepository::new()))
}

fn system_role_service(db: &DatabaseConnection) -> SystemRoleService<SeaOrmSystemRoleRepository> {
    SystemRoleService::new(db.clone(), Arc::new(SeaOrmSystemRoleRepository::new()))
}

// =========================================================================
// Graph seeding helpers
// =========================================================================

async fn seed_namespace(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    namespace::ActiveModel {
        id: ActiveValue::Set(id),
        name: ActiveValue::Set(name.to_owned()),
        created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

async fn seed_user(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    user::ActiveModel {
        id: ActiveValue::Set(id),
        name: ActiveValue::Set(name.to_owned()),
        email: ActiveValue::Set(format!("{name}-{id}@example.com")),
        created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

async fn seed_group(db: &DatabaseConnection, namespace_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    user_group::ActiveModel {
        id: ActiveValue::Set(id),
        namespace_id: ActiveValue::Set(namespace_id),
        name: ActiveValue::Set(name.to_owned()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

async fn add_member(db: &DatabaseConnection, namespace_id: Uuid, group_id: Uuid, user_id: Uuid) {
    user_group_belonging::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        namespace_id: ActiveValue::Set(namespace_id),
        user_id: ActiveValue::Set(user_id),
        user_group_id: ActiveValue::Set(group_id),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn seed_role(db: &DatabaseConnection, namespace_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    role::ActiveModel {
        id: ActiveValue::Set(id),
        namespace_id: ActiveValue::Set(namespace_id),
        name: ActiveValue::Set(name.to_owned()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

async fn assign_role(db: &DatabaseConnection, namespace_id: Uuid, group_id: Uuid, role_id: Uuid) {
    user_group_role_assignment::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        namespace_id: ActiveValue::Set(namespace_id),
        user_group_id: ActiveValue::Set(group_id),
        role_id: ActiveValue::Set(role_id),
    }
    .insert(db)
    .await
    .unwrap();
}

/// Create path, target group, targets, and the endpoint tying them together.
async fn seed_endpoint(
    db: &DatabaseConnection,
    namespace_id: Uuid,
    path_regex: &str,
    method: &str,
    object_id_patterns: &[&str],
) -> Uuid {
    let path_id = Uuid::new_v4();
    path::ActiveModel {
        id: ActiveValue::Set(path_id),
        namespace_id: ActiveValue::Set(namespace_id),
        regex: ActiveValue::Set(path_regex.to_owned()),
    }
    .insert(db)
    .await
    .unwrap();

    let target_group_id = Uuid::new_v4();
    target_group::ActiveModel {
        id: ActiveValue::Set(target_group_id),
        namespace_id: ActiveValue::Set(namespace_id),
        name: ActiveValue::Set("targets".to_owned()),
    }
    .insert(db)
    .await
    .unwrap();

    for pattern in object_id_patterns {
        let target_id = Uuid::new_v4();
        target::ActiveModel {
            id: ActiveValue::Set(target_id),
            namespace_id: ActiveValue::Set(namespace_id),
            object_id_regex: ActiveValue::Set((*pattern).to_owned()),
        }
        .insert(db)
        .await
        .unwrap();
        target_group_belonging::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            namespace_id: ActiveValue::Set(namespace_id),
            target_group_id: ActiveValue::Set(target_group_id),
            target_id: ActiveValue::Set(target_id),
        }
        .insert(db)
        .await
        .unwrap();
    }

    let endpoint_id = Uuid::new_v4();
    endpoint::ActiveModel {
        id: ActiveValue::Set(endpoint_id),
        namespace_id: ActiveValue::Set(namespace_id),
        path_id: ActiveValue::Set(path_id),
        method: ActiveValue::Set(method.to_owned()),
        target_group_id: ActiveValue::Set(target_group_id),
    }
    .insert(db)
    .await
    .unwrap();
    endpoint_id
}

async fn permit(db: &DatabaseConnection, namespace_id: Uuid, role_id: Uuid, endpoint_id: Uuid) {
    role_endpoint_permission::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        namespace_id: ActiveValue::Set(namespace_id),
        role_id: ActiveValue::Set(role_id),
        endpoint_id: ActiveValue::Set(endpoint_id),
    }
    .insert(db)
    .await
    .unwrap();
}

/// Full chain: user → group → role → endpoint(`(GET|POST)`,
/// `/user-service/v1/.*`) → target `object-id-[1-3]`.
async fn seed_standard_grant(db: &DatabaseConnection, namespace_id: Uuid, user_id: Uuid) {
    let group_id = seed_group(db, namespace_id, "operators").await;
    add_member(db, namespace_id, group_id, user_id).await;
    let role_id = seed_role(db, namespace_id, "user-service-caller").await;
    assign_role(db, namespace_id, group_id, role_id).await;
    let endpoint_id = seed_endpoint(
        db,
        namespace_id,
        "/user-service/v1/.*",
        "(GET|POST)",
        &["object-id-[1-3]"],
    )
    .await;
    permit(db, namespace_id, role_id, endpoint_id).await;
}

fn request(user_id: Uuid, namespace_id: Uuid, method: &str, req_path: &str) -> AccessRequest {
    AccessRequest {
        user_id,
        namespace_id,
        path: req_path.to_owned(),
        method: method.to_owned(),
        object_id: "object-id-1".to_owned(),
    }
}

// =========================================================================
// Privilege resolver tests
// =========================================================================

#[tokio::test]
async fn resolver_returns_empty_for_unknown_user_and_namespace() {
    let db = inmem_db().await;
    let service = access_service(&db);

    assert!(service.user_privileges(Uuid::new_v4()).await.unwrap().is_empty());
    assert!(
        service
            .list_privileges(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn resolver_flattens_full_chain_into_one_fact() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;
    seed_standard_grant(&db, ns, alice).await;

    let service = access_service(&db);
    let facts = service.user_privileges(alice).await.unwrap();

    assert_eq!(facts.len(), 1);
    let fact = &facts[0];
    assert_eq!(fact.user_id, alice);
    assert_eq!(fact.user_name, "alice");
    assert_eq!(fact.namespace_id, ns);
    assert_eq!(fact.namespace_name, "production");
    assert_eq!(fact.user_group_name, "operators");
    assert_eq!(fact.role_name, "user-service-caller");
    assert_eq!(fact.path_regex, "/user-service/v1/.*");
    assert_eq!(fact.method, "(GET|POST)");
    assert_eq!(fact.target_group_name, "targets");
    assert_eq!(fact.object_id_regex, "object-id-[1-3]");
}

#[tokio::test]
async fn resolver_emits_one_row_per_target() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;
    let group = seed_group(&db, ns, "operators").await;
    add_member(&db, ns, group, alice).await;
    let role_id = seed_role(&db, ns, "caller").await;
    assign_role(&db, ns, group, role_id).await;
    let endpoint_id = seed_endpoint(&db, ns, "/svc/.*", "GET", &["obj-a", "obj-b"]).await;
    permit(&db, ns, role_id, endpoint_id).await;

    let facts = access_service(&db).user_privileges(alice).await.unwrap();

    assert_eq!(facts.len(), 2);
    let mut patterns: Vec<_> = facts.iter().map(|f| f.object_id_regex.clone()).collect();
    patterns.sort();
    assert_eq!(patterns, vec!["obj-a".to_owned(), "obj-b".to_owned()]);
}

#[tokio::test]
async fn resolver_preserves_duplicate_grant_paths() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;
    let role_id = seed_role(&db, ns, "caller").await;
    let endpoint_id = seed_endpoint(&db, ns, "/svc/.*", "GET", &["obj"]).await;
    permit(&db, ns, role_id, endpoint_id).await;

    // Same role reached through two different groups.
    for group_name in ["operators", "admins"] {
        let group = seed_group(&db, ns, group_name).await;
        add_member(&db, ns, group, alice).await;
        assign_role(&db, ns, group, role_id).await;
    }

    let facts = access_service(&db).user_privileges(alice).await.unwrap();
    assert_eq!(facts.len(), 2);
}

#[tokio::test]
async fn resolver_output_is_deterministic() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;
    let group = seed_group(&db, ns, "operators").await;
    add_member(&db, ns, group, alice).await;
    let role_id = seed_role(&db, ns, "caller").await;
    assign_role(&db, ns, group, role_id).await;
    for i in 0..4 {
        let endpoint_id =
            seed_endpoint(&db, ns, &format!("/svc-{i}/.*"), "GET", &["x", "y"]).await;
        permit(&db, ns, role_id, endpoint_id).await;
    }

    let service = access_service(&db);
    let first = service.user_privileges(alice).await.unwrap();
    let second = service.user_privileges(alice).await.unwrap();

    assert_eq!(first.len(), 8);
    assert_eq!(first, second);
}

#[tokio::test]
async fn resolver_ignores_incomplete_chains() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;
    let group = seed_group(&db, ns, "operators").await;
    add_member(&db, ns, group, alice).await;
    let role_id = seed_role(&db, ns, "caller").await;
    assign_role(&db, ns, group, role_id).await;
    // Role granted to the group, but no endpoint permission attached.

    let facts = access_service(&db).user_privileges(alice).await.unwrap();
    assert!(facts.is_empty());
}

#[tokio::test]
async fn namespace_listing_is_isolated() {
    let db = inmem_db().await;
    let ns1 = seed_namespace(&db, "one").await;
    let ns2 = seed_namespace(&db, "two").await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    seed_standard_grant(&db, ns1, alice).await;
    seed_standard_grant(&db, ns2, bob).await;

    let service = access_service(&db);
    let listed = service.list_privileges(ns1).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].namespace_id, ns1);
    assert_eq!(listed[0].user_id, alice);
}

// =========================================================================
// Access decision tests (end to end)
// =========================================================================

#[tokio::test]
async fn can_access_allows_matching_request() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;
    seed_standard_grant(&db, ns, alice).await;

    let service = access_service(&db);
    assert!(
        service
            .can_access(&request(alice, ns, "GET", "/user-service/v1/"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn can_access_denies_on_any_dimension_mismatch() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let other_ns = seed_namespace(&db, "staging").await;
    let alice = seed_user(&db, "alice").await;
    seed_standard_grant(&db, ns, alice).await;

    let service = access_service(&db);

    // Method outside the alternation.
    assert!(
        !service
            .can_access(&request(alice, ns, "DELETE", "/user-service/v1/"))
            .await
            .unwrap()
    );
    // Path outside the pattern.
    assert!(
        !service
            .can_access(&request(alice, ns, "GET", "/user-service/v2/"))
            .await
            .unwrap()
    );
    // Namespace mismatch.
    assert!(
        !service
            .can_access(&request(alice, other_ns, "GET", "/user-service/v1/"))
            .await
            .unwrap()
    );
    // Unknown user has no facts at all.
    assert!(
        !service
            .can_access(&request(Uuid::new_v4(), ns, "GET", "/user-service/v1/"))
            .await
            .unwrap()
    );
}

// =========================================================================
// System role aggregation tests
// =========================================================================

#[tokio::test]
async fn aggregate_permission_is_none_without_grants() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let alice = seed_user(&db, "alice").await;

    let service = system_role_service(&db);
    let level = service.aggregate_permission(alice, ns).await.unwrap();

    assert_eq!(level, SystemPermission::None);
}

#[tokio::test]
async fn aggregate_permission_takes_maximum_level() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let creator = seed_user(&db, "creator").await;
    let alice = seed_user(&db, "alice").await;

    let service = system_role_service(&db);
    let (read_role, write_role) = service.provision_defaults(ns, creator).await.unwrap();

    // READ only.
    service.grant(ns, alice, read_role.id).await.unwrap();
    assert_eq!(
        service.aggregate_permission(alice, ns).await.unwrap(),
        SystemPermission::Read
    );

    // READ and WRITE held together aggregate to WRITE.
    service.grant(ns, alice, write_role.id).await.unwrap();
    assert_eq!(
        service.aggregate_permission(alice, ns).await.unwrap(),
        SystemPermission::Write
    );
}

#[tokio::test]
async fn aggregation_is_scoped_to_the_namespace() {
    let db = inmem_db().await;
    let ns1 = seed_namespace(&db, "one").await;
    let ns2 = seed_namespace(&db, "two").await;
    let creator = seed_user(&db, "creator").await;

    let service = system_role_service(&db);
    service.provision_defaults(ns1, creator).await.unwrap();

    assert_eq!(
        service.aggregate_permission(creator, ns1).await.unwrap(),
        SystemPermission::Write
    );
    assert_eq!(
        service.aggregate_permission(creator, ns2).await.unwrap(),
        SystemPermission::None
    );
}

// =========================================================================
// Provisioning tests
// =========================================================================

#[tokio::test]
async fn provision_defaults_creates_roles_and_creator_grant() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let creator = seed_user(&db, "creator").await;

    let service = system_role_service(&db);
    let (read_role, write_role) = service.provision_defaults(ns, creator).await.unwrap();

    assert_eq!(read_role.name, DEFAULT_READ_ROLE);
    assert_eq!(read_role.permission, SystemPermission::Read);
    assert_eq!(write_role.name, DEFAULT_WRITE_ROLE);
    assert_eq!(write_role.permission, SystemPermission::Write);

    let roles = service.list_system_roles(ns).await.unwrap();
    assert_eq!(roles.len(), 2);

    assert_eq!(
        service.aggregate_permission(creator, ns).await.unwrap(),
        SystemPermission::Write
    );
}

#[tokio::test]
async fn provision_defaults_rejects_unknown_namespace_and_creator() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let creator = seed_user(&db, "creator").await;
    let service = system_role_service(&db);

    let err = service
        .provision_defaults(Uuid::new_v4(), creator)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity, .. } if entity == "namespace"));

    let err = service
        .provision_defaults(ns, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity, .. } if entity == "user"));

    // The failed attempts must not leave partial provisioning behind.
    assert!(service.list_system_roles(ns).await.unwrap().is_empty());
}

// =========================================================================
// Grant / revoke tests
// =========================================================================

#[tokio::test]
async fn duplicate_grant_is_a_conflict() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let creator = seed_user(&db, "creator").await;
    let alice = seed_user(&db, "alice").await;

    let service = system_role_service(&db);
    let (read_role, _) = service.provision_defaults(ns, creator).await.unwrap();

    service.grant(ns, alice, read_role.id).await.unwrap();
    let err = service.grant(ns, alice, read_role.id).await.unwrap_err();

    assert!(matches!(err, DomainError::DuplicateGrant { .. }));
}

#[tokio::test]
async fn grant_rejects_role_from_another_namespace() {
    let db = inmem_db().await;
    let ns1 = seed_namespace(&db, "one").await;
    let ns2 = seed_namespace(&db, "two").await;
    let creator = seed_user(&db, "creator").await;
    let alice = seed_user(&db, "alice").await;

    let service = system_role_service(&db);
    let (read_role, _) = service.provision_defaults(ns1, creator).await.unwrap();

    let err = service.grant(ns2, alice, read_role.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = service.grant(ns1, alice, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn revoke_removes_the_grant() {
    let db = inmem_db().await;
    let ns = seed_namespace(&db, "production").await;
    let creator = seed_user(&db, "creator").await;

    let service = system_role_service(&db);
    let (_, write_role) = service.provision_defaults(ns, creator).await.unwrap();

    service.revoke(ns, creator, write_role.id).await.unwrap();
    assert_eq!(
        service.aggregate_permission(creator, ns).await.unwrap(),
        SystemPermission::None
    );

    // Revoking again is a NotFound.
    let err = service.revoke(ns, creator, write_role.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
