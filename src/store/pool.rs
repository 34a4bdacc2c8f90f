//! SQLite connection handling and schema bootstrap.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::seq::SliceRandom;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{error, info, warn};

use super::errors::{StoreError, StoreResult};

/// Number of placeholder messages written into a freshly created store
pub const SEED_MESSAGE_COUNT: usize = 5;

const MESSAGES_SCHEMA: &str =
    "CREATE TABLE Messages (id INTEGER PRIMARY KEY AUTOINCREMENT, message TEXT)";

// Non-key columns are untyped so each value keeps the storage class it was
// written with.
const ESTADISTICA_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS estadistica (
        id INTEGER PRIMARY KEY,
        fecha_ingreso,
        hora_ingreso,
        pais,
        ciudad,
        tiempo,
        ruta,
        dispositivo
    )
"#;

const PHRASE_LEAD: &[&str] = &[
    "Adaptive", "Balanced", "Customizable", "Distributed", "Ergonomic", "Focused",
    "Innovative", "Proactive", "Seamless", "Visionary",
];
const PHRASE_MIDDLE: &[&str] = &[
    "asynchronous", "bottom-line", "client-driven", "dynamic", "heuristic", "mobile",
    "modular", "real-time", "scalable", "zero-defect",
];
const PHRASE_TAIL: &[&str] = &[
    "algorithm", "capability", "database", "framework", "hierarchy", "interface",
    "middleware", "paradigm", "solution", "toolset",
];

/// Where the backing store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A database file, created if missing
    File(PathBuf),
    /// A private in-memory database (tests)
    InMemory,
}

impl StoreLocation {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

/// Owner of the single shared SQLite connection.
///
/// Cloning is cheap and every clone talks to the same connection.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the store and bootstrap the `Messages` table if the
    /// backing file did not exist before.
    pub async fn open(location: &StoreLocation) -> StoreResult<Self> {
        let (options, is_new) = match location {
            StoreLocation::File(path) => {
                let is_new = !path.exists();
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                (options, is_new)
            }
            StoreLocation::InMemory => (SqliteConnectOptions::from_str("sqlite::memory:")?, true),
        };

        info!(location = ?location, is_new, "Opening SQLite store");

        // One connection, never recycled: an in-memory database lives exactly
        // as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };

        if is_new {
            store.bootstrap_messages().await?;
        }

        match store.list_messages().await {
            Ok(messages) => info!(count = messages.len(), "Store ready"),
            Err(e) => warn!(error = %e, "Store opened but Messages is unreadable"),
        }

        Ok(store)
    }

    /// Create the `estadistica` table if it does not exist yet
    pub async fn create_estadistica_table(&self) -> StoreResult<()> {
        log_failure(
            "create_estadistica_table",
            sqlx::query(ESTADISTICA_SCHEMA).execute(&self.pool).await,
        )?;
        info!("estadistica table ready");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn bootstrap_messages(&self) -> StoreResult<()> {
        info!("Creating Messages table with sample rows");

        log_failure(
            "bootstrap_messages",
            sqlx::query(MESSAGES_SCHEMA).execute(&self.pool).await,
        )?;

        for _ in 0..SEED_MESSAGE_COUNT {
            let phrase = catch_phrase();
            log_failure(
                "bootstrap_messages",
                sqlx::query("INSERT INTO Messages (message) VALUES (?)")
                    .bind(phrase)
                    .execute(&self.pool)
                    .await,
            )?;
        }

        Ok(())
    }
}

/// Log a driver failure under the operation name, then convert it
pub(crate) fn log_failure<T>(
    operation: &'static str,
    result: Result<T, sqlx::Error>,
) -> StoreResult<T> {
    result.map_err(|e| {
        let err = StoreError::from(e);
        error!(operation, kind = err.kind(), error = %err, "Store operation failed");
        err
    })
}

fn catch_phrase() -> String {
    let mut rng = rand::thread_rng();
    [PHRASE_LEAD, PHRASE_MIDDLE, PHRASE_TAIL]
        .iter()
        .filter_map(|words| words.choose(&mut rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}
