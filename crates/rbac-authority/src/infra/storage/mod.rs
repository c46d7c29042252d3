//! Database persistence: entities, migrations, repositories.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub mod entity;
pub mod migrations;
pub mod sea_orm_repo;

/// Connect to the privilege store.
///
/// # Errors
///
/// Returns `DbErr` when the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url.to_owned());
    opts.max_connections(max_connections).sqlx_logging(false);
    Database::connect(opts).await
}
