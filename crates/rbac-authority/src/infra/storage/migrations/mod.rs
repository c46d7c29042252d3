//! Database schema migrations for the authorization graph.

use sea_orm_migration::prelude::*;

mod m20250815_000001_create_authorization_graph;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250815_000001_create_authorization_graph::Migration,
        )]
    }
}
