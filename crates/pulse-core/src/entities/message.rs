//! Message entity - represents a persisted chat message
//!
//! A message is either direct (has a receiver) or group-scoped (has a group id);
//! exactly one of the two is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GroupId, MessageId, UserId};

/// Mutable per-message flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFlags {
    pub seen: bool,
    pub starred: bool,
    pub pinned: bool,
    pub edited: bool,
}

/// Message entity
///
/// Owned by the persistence collaborator; the signaling core only reads it when
/// fanning out create/edit/delete/seen notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    /// Set for direct messages, absent for group messages
    pub receiver_id: Option<UserId>,
    /// Set for group messages, absent for direct messages
    pub group_id: Option<GroupId>,
    pub text: Option<String>,
    /// Externally hosted image URL, carried opaquely
    pub image: Option<String>,
    /// Externally hosted voice-message URL, carried opaquely
    pub audio: Option<String>,
    #[serde(flatten)]
    pub flags: MessageFlags,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new direct message
    pub fn direct(id: MessageId, sender_id: UserId, receiver_id: UserId, text: impl Into<String>) -> Self {
        Self {
            id,
            sender_id,
            receiver_id: Some(receiver_id),
            group_id: None,
            text: Some(text.into()),
            image: None,
            audio: None,
            flags: MessageFlags::default(),
            created_at: Utc::now(),
        }
    }

    /// Create a new group message
    pub fn group(id: MessageId, sender_id: UserId, group_id: GroupId, text: impl Into<String>) -> Self {
        Self {
            id,
            sender_id,
            receiver_id: None,
            group_id: Some(group_id),
            text: Some(text.into()),
            image: None,
            audio: None,
            flags: MessageFlags::default(),
            created_at: Utc::now(),
        }
    }

    /// Attach an image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Attach an audio URL
    pub fn with_audio(mut self, url: impl Into<String>) -> Self {
        self.audio = Some(url.into());
        self
    }

    /// Check whether this message is group-scoped
    #[inline]
    pub fn is_group(&self) -> bool {
        self.group_id.is_some()
    }

    /// Check whether the message carries no content at all
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
            && self.image.is_none()
            && self.audio.is_none()
    }
}
