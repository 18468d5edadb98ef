//! PostgreSQL implementation of CallStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{CallStore, StoreResult};
use pulse_core::{CallRecord, UserId};

use crate::models::CallModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CallStore
#[derive(Clone)]
pub struct PgCallStore {
    pool: PgPool,
}

impl PgCallStore {
    /// Create a new PgCallStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallStore for PgCallStore {
    #[instrument(skip(self, record))]
    async fn create_record(&self, record: CallRecord) -> StoreResult<()> {
        sqlx::query(
            r"
            INSERT INTO calls (caller_id, receiver_id, kind, status, start_time, end_time, duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.caller_id.as_str())
        .bind(record.receiver_id.as_str())
        .bind(record.kind.as_str())
        .bind(record.status.as_str())
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.duration)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn history(&self, user_id: &UserId) -> StoreResult<Vec<CallRecord>> {
        let rows = sqlx::query_as::<_, CallModel>(
            r"
            SELECT caller_id, receiver_id, kind, status, start_time, end_time, duration
            FROM calls
            WHERE caller_id = $1 OR receiver_id = $1
            ORDER BY start_time DESC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CallRecord::from).collect())
    }
}
