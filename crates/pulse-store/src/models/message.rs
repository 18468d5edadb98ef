//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use pulse_core::{GroupId, Message, MessageFlags, MessageId, UserId};

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: Option<String>,
    pub group_id: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub audio: Option<String>,
    pub is_seen: bool,
    pub is_starred: bool,
    pub is_pinned: bool,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: MessageId::new(model.id),
            sender_id: UserId::new(model.sender_id),
            receiver_id: model.receiver_id.map(UserId::new),
            group_id: model.group_id.map(GroupId::new),
            text: model.text,
            image: model.image,
            audio: model.audio,
            flags: MessageFlags {
                seen: model.is_seen,
                starred: model.is_starred,
                pinned: model.is_pinned,
                edited: model.is_edited,
            },
            created_at: model.created_at,
        }
    }
}
