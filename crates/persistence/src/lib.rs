//! # Director Persistence
//!
//! Persistence layer cho director registry - SQLite via sqlx.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     Database                         │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐  │
//! │  │   SQLite    │   │    Repos    │   │ SqliteStore│  │
//! │  │   (pool)    │   │  (queries)  │   │  (engine)  │  │
//! │  └─────────────┘   └─────────────┘   └────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use director_persistence::{Database, DirectorRepo};
//!
//! let db = Database::init("sqlite:data/director.db?mode=rwc", 5).await?;
//! let rows = DirectorRepo::get_all(db.pool()).await?;
//! let store = db.store();
//! ```

pub mod error;
pub mod sqlite;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::schema::{AssociationRow, BusinessUnitRow, DirectorRow};
pub use sqlite::{
    create_schema, AccountDirectoryRepo, BusinessUnitRepo, ClassRepo, CompanyRepo, DirectorRepo,
};
pub use store::{AssignmentStore, SqliteStore};

use sqlx::SqlitePool;

/// Database facade - owns the pool and hands out the assignment store
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to an existing database
    ///
    /// # Arguments
    /// * `db_url` - SQLite database URL (e.g., "sqlite:director.db")
    /// * `max_connections` - pool size, at least 1
    pub async fn connect(db_url: &str, max_connections: u32) -> PersistenceResult<Self> {
        let pool = sqlite::create_pool(db_url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Open (creating if missing) and bootstrap the schema
    pub async fn init(db_url: &str, max_connections: u32) -> PersistenceResult<Self> {
        let pool = sqlite::init_database(db_url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> PersistenceResult<Self> {
        let pool = sqlite::in_memory_database().await?;
        Ok(Self { pool })
    }

    /// Get SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Assignment store sharing this pool
    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
