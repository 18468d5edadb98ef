//! PostgreSQL implementation of MessageStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{MessageStore, StoreResult};
use pulse_core::{Message, MessageFlags, MessageId, UserId};

use crate::models::MessageModel;

use super::error::{map_db_error, message_not_found};

/// PostgreSQL implementation of MessageStore
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    /// Create a new PgMessageStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, sender_id, receiver_id, group_id, text, image, audio, \
                              is_seen, is_starred, is_pinned, is_edited, created_at";

#[async_trait]
impl MessageStore for PgMessageStore {
    #[instrument(skip(self, message))]
    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        let row = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            INSERT INTO messages (id, sender_id, receiver_id, group_id, text, image, audio, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SELECT_COLUMNS}
            ",
        ))
        .bind(message.id.as_str())
        .bind(message.sender_id.as_str())
        .bind(message.receiver_id.as_ref().map(UserId::as_str))
        .bind(message.group_id.as_ref().map(|g| g.as_str()))
        .bind(&message.text)
        .bind(&message.image)
        .bind(&message.audio)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_message(&self, id: &MessageId) -> StoreResult<Option<Message>> {
        let row = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM messages WHERE id = $1",
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_between(&self, a: &UserId, b: &UserId) -> StoreResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS} FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            ",
        ))
        .bind(a.as_str())
        .bind(b.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_flags(&self, id: &MessageId, flags: MessageFlags) -> StoreResult<Message> {
        let row = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            UPDATE messages
            SET is_seen = $2, is_starred = $3, is_pinned = $4, is_edited = $5
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            ",
        ))
        .bind(id.as_str())
        .bind(flags.seen)
        .bind(flags.starred)
        .bind(flags.pinned)
        .bind(flags.edited)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Message::from).ok_or_else(|| message_not_found(id))
    }

    #[instrument(skip(self, text))]
    async fn update_text(&self, id: &MessageId, text: String) -> StoreResult<Message> {
        let row = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            UPDATE messages
            SET text = $2, is_edited = TRUE
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            ",
        ))
        .bind(id.as_str())
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Message::from).ok_or_else(|| message_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete_message(&self, id: &MessageId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_seen_batch(&self, sender: &UserId, receiver: &UserId) -> StoreResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE messages
            SET is_seen = TRUE
            WHERE sender_id = $1 AND receiver_id = $2 AND is_seen = FALSE
            ",
        )
        .bind(sender.as_str())
        .bind(receiver.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
