//! User profile projection
//!
//! The signaling core never owns user accounts; it only needs the display
//! fields carried on call offers and the ghost-mode flag consumed by the
//! discovery collaborators.

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Read-only projection of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub profile_pic: Option<String>,
    /// Ghost-mode users are excluded from discovery surfaces
    pub ghost_mode: bool,
    /// Client-published E2EE public key, stored verbatim
    pub public_key: Option<String>,
}

impl UserProfile {
    /// Check whether this user may appear in discovery feeds
    #[inline]
    pub fn is_discoverable(&self) -> bool {
        !self.ghost_mode
    }
}
