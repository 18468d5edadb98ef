//! Group entity - a multi-member conversation

use serde::{Deserialize, Serialize};

use crate::value_objects::{GroupId, MessageId, UserId};

/// Group entity
///
/// Membership can change between message sends, so fan-out always resolves the
/// current member set through the store rather than caching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub members: Vec<UserId>,
    pub admins: Vec<UserId>,
    pub avatar: Option<String>,
    pub last_message_id: Option<MessageId>,
}

impl Group {
    /// Check whether a user is currently a member
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    /// Check whether a user is an admin
    pub fn is_admin(&self, user_id: &UserId) -> bool {
        self.admins.contains(user_id)
    }
}
