use anyhow::{anyhow, Context};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use crate::DBPool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a connection waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build the process-wide connection pool for the SQLite file at `database_url`.
pub fn build_pool(database_url: &str) -> anyhow::Result<DBPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .with_context(|| format!("failed to create connection pool for `{}`", database_url))
}

/// Create the tables if they are absent. Safe to run on every startup.
pub fn run_migrations(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("failed to run migrations: {}", e))?;

    for version in applied {
        info!("Applied migration {}", version);
    }

    Ok(())
}
