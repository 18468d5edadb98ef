//! Connection lifecycle and presence tracking

mod connection;
mod registry;

pub use connection::{Connection, SessionState};
pub use registry::PresenceRegistry;
