//! User database model

use sqlx::FromRow;

use pulse_core::{UserId, UserProfile};

/// Database model for the users table (profile projection)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
    pub is_ghost_mode: bool,
    pub public_key: Option<String>,
}

impl From<UserModel> for UserProfile {
    fn from(model: UserModel) -> Self {
        UserProfile {
            id: UserId::new(model.id),
            full_name: model.full_name,
            profile_pic: model.profile_pic,
            ghost_mode: model.is_ghost_mode,
            public_key: model.public_key,
        }
    }
}
