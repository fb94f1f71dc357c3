pub mod repositories;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open a pool for `database_url` (`sqlite://path` or `sqlite::memory:`).
///
/// File databases are created if missing and run in WAL mode. In-memory
/// databases live on a single connection that is never recycled, otherwise
/// each pooled connection would see its own empty database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Connected to SQLite: {}", database_url);
    Ok(pool)
}

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "parties",
        r#"
        CREATE TABLE IF NOT EXISTS parties (
            id          TEXT PRIMARY KEY,
            owner_id    TEXT NOT NULL,
            invite_code TEXT NOT NULL UNIQUE,
            max_size    INTEGER NOT NULL,
            created_at  INTEGER NOT NULL,
            updated_at  INTEGER NOT NULL
        )
        "#,
    ),
    (
        "party_members",
        r#"
        CREATE TABLE IF NOT EXISTS party_members (
            party_id   TEXT NOT NULL REFERENCES parties(id),
            account_id TEXT NOT NULL,
            role       TEXT NOT NULL,
            joined_at  INTEGER NOT NULL
        )
        "#,
    ),
    (
        "idx_party_members_unique",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_party_members_unique ON party_members (party_id, account_id)",
    ),
    (
        "idx_party_members_account",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_party_members_account ON party_members (account_id)",
    ),
];

/// Create tables and unique indexes. Safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    for &(name, statement) in MIGRATIONS {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            tracing::error!("Migration {} failed: {}", name, e);
            e
        })?;
    }

    tracing::info!("Migrations complete");
    Ok(())
}
