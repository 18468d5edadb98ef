//! # pulse-core
//!
//! Domain layer containing identifiers, entities, store traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{CallKind, CallRecord, CallStatus, Group, Message, MessageFlags, UserProfile};
pub use error::DomainError;
pub use traits::{CallStore, GroupStore, MessageStore, StoreResult, UserStore};
pub use value_objects::{ConnectionId, GroupId, MessageId, UserId};
