use crate::error::{DirectoryResult, MigrateSnafu, OpenDatabaseSnafu};
use snafu::ResultExt;
use sqlx::{
    Pool, Sqlite,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Shared handle to the student database.
///
/// Holds a single SQLite connection for the whole process lifetime. If the database could not be
/// opened at startup the state is still built, and every request then fails with a storage error.
#[derive(Clone, Debug)]
pub struct DirectoryState {
    pool: Option<Pool<Sqlite>>,
}

impl DirectoryState {
    pub async fn new(options: SqliteConnectOptions) -> Self {
        let pool = match Self::open(options).await {
            Ok(pool) => pool,
            Err(e) => {
                error!(?e, "Error connecting to the SQLite database");
                return Self { pool: None };
            }
        };
        info!("Connected to the SQLite database");

        match sqlx::migrate!().run(&pool).await.context(MigrateSnafu) {
            Ok(()) => info!("`students` table ready"),
            Err(e) => error!(?e, "Error creating `students` table"),
        }

        Self { pool: Some(pool) }
    }

    async fn open(options: SqliteConnectOptions) -> DirectoryResult<Pool<Sqlite>> {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context(OpenDatabaseSnafu)
    }

    pub async fn get_connection(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        match &self.pool {
            Some(pool) => pool.acquire().await,
            None => Err(sqlx::Error::PoolClosed),
        }
    }

    pub async fn sensible_shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Closed the SQLite database");
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::DirectoryState;
    use sqlx::sqlite::SqliteConnectOptions;
    use std::str::FromStr;

    pub async fn in_memory_state() -> DirectoryState {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        DirectoryState::new(options).await
    }
}
