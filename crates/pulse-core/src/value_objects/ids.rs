//! Domain identifiers
//!
//! Users, groups, and messages live in an external document store and are keyed
//! by opaque string object ids. Connections are ephemeral and keyed by a v4 UUID
//! minted at handshake time.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from its raw string form
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View the id as a string slice
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id, returning the raw string
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identity of a user account in the document store
    UserId
}

string_id! {
    /// Identity of a group conversation
    GroupId
}

string_id! {
    /// Identity of a persisted message
    MessageId
}

/// Ephemeral identity of one realtime connection
///
/// Minted at handshake, never persisted, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Mint a fresh connection id
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
