//! Database Module
//!
//! Embedded SurrealDB holding booking records. Schema and secondary
//! indexes are installed at startup; lookups by property, by user and
//! by user+property go through the matching index, never a table scan.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::utils::AppError;

const NAMESPACE: &str = "luxstay";
const DATABASE: &str = "bookings";

/// 预订表结构与二级索引
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS booking_id_unique ON TABLE booking COLUMNS booking_id UNIQUE;
    DEFINE INDEX IF NOT EXISTS booking_property ON TABLE booking COLUMNS property_id;
    DEFINE INDEX IF NOT EXISTS booking_user ON TABLE booking COLUMNS user_id;
    DEFINE INDEX IF NOT EXISTS booking_user_property ON TABLE booking COLUMNS user_id, property_id;
";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and install the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<surrealdb::engine::local::RocksDb>(db_path)
            .await
            .map_err(|e| AppError::upstream(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<surrealdb::engine::local::Mem>(())
            .await
            .map_err(|e| AppError::upstream(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::upstream(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::upstream(format!("Failed to install schema: {e}")))?;

        tracing::info!("Database ready (booking table + secondary indexes)");

        Ok(Self { db })
    }
}
