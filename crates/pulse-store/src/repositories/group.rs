//! PostgreSQL implementation of GroupStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{GroupStore, StoreResult};
use pulse_core::{Group, GroupId, MessageId, UserId};

use crate::models::{GroupMemberModel, GroupModel};

use super::error::{group_not_found, map_db_error};

/// PostgreSQL implementation of GroupStore
#[derive(Clone)]
pub struct PgGroupStore {
    pool: PgPool,
}

impl PgGroupStore {
    /// Create a new PgGroupStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupStore for PgGroupStore {
    #[instrument(skip(self))]
    async fn find_group(&self, id: &GroupId) -> StoreResult<Option<Group>> {
        let group = sqlx::query_as::<_, GroupModel>(
            "SELECT id, name, avatar, last_message_id FROM groups WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(group) = group else {
            return Ok(None);
        };

        let members = sqlx::query_as::<_, GroupMemberModel>(
            "SELECT group_id, user_id, is_admin FROM group_members WHERE group_id = $1",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let admins = members
            .iter()
            .filter(|m| m.is_admin)
            .map(|m| UserId::new(m.user_id.clone()))
            .collect();

        Ok(Some(Group {
            id: GroupId::new(group.id),
            name: group.name,
            members: members.into_iter().map(|m| UserId::new(m.user_id)).collect(),
            admins,
            avatar: group.avatar,
            last_message_id: group.last_message_id.map(MessageId::new),
        }))
    }

    #[instrument(skip(self))]
    async fn find_members(&self, id: &GroupId) -> StoreResult<Vec<UserId>> {
        let rows = sqlx::query_as::<_, GroupMemberModel>(
            "SELECT group_id, user_id, is_admin FROM group_members WHERE group_id = $1",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|m| UserId::new(m.user_id)).collect())
    }

    #[instrument(skip(self))]
    async fn set_last_message(&self, id: &GroupId, message_id: &MessageId) -> StoreResult<()> {
        let result = sqlx::query("UPDATE groups SET last_message_id = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(message_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(id));
        }

        Ok(())
    }
}
