//! PostgreSQL implementation of UserStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{StoreResult, UserStore};
use pulse_core::{UserId, UserProfile};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserStore
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new PgUserStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_profile(&self, id: &UserId) -> StoreResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserModel>(
            "SELECT id, full_name, profile_pic, is_ghost_mode, public_key FROM users WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(UserProfile::from))
    }
}
