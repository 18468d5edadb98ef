//! Group database models

use sqlx::FromRow;

/// Database model for the groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub last_message_id: Option<String>,
}

/// Database model for the group_members table
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberModel {
    pub group_id: String,
    pub user_id: String,
    pub is_admin: bool,
}
