//! Store traits (ports) - the persistence collaborator's interface
//!
//! The signaling core treats persisted storage as an external collaborator
//! reached through simple find/update operations. The domain layer defines
//! what it needs; the infrastructure layer provides the implementation.

use async_trait::async_trait;

use crate::entities::{CallRecord, Group, Message, MessageFlags, UserProfile};
use crate::error::DomainError;
use crate::value_objects::{GroupId, MessageId, UserId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Persisted message operations
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message, returning it with its assigned id
    async fn create_message(&self, message: Message) -> StoreResult<Message>;

    /// Find a message by id
    async fn find_message(&self, id: &MessageId) -> StoreResult<Option<Message>>;

    /// Find the direct-message history between two users
    async fn find_between(&self, a: &UserId, b: &UserId) -> StoreResult<Vec<Message>>;

    /// Replace a message's flags, returning the updated message
    async fn update_flags(&self, id: &MessageId, flags: MessageFlags) -> StoreResult<Message>;

    /// Replace a message's text and mark it edited, returning the updated message
    async fn update_text(&self, id: &MessageId, text: String) -> StoreResult<Message>;

    /// Delete a message
    async fn delete_message(&self, id: &MessageId) -> StoreResult<()>;

    /// Mark every unseen message from `sender` to `receiver` as seen in one
    /// atomic batch, returning the number of messages updated
    async fn mark_seen_batch(&self, sender: &UserId, receiver: &UserId) -> StoreResult<u64>;
}

/// Persisted group operations
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Find a group by id
    async fn find_group(&self, id: &GroupId) -> StoreResult<Option<Group>>;

    /// Resolve the current member set of a group
    ///
    /// Called at fan-out time; membership may have changed since the message
    /// was sent.
    async fn find_members(&self, id: &GroupId) -> StoreResult<Vec<UserId>>;

    /// Update a group's last-message reference
    async fn set_last_message(&self, id: &GroupId, message_id: &MessageId) -> StoreResult<()>;
}

/// Persisted call-attempt operations
#[async_trait]
pub trait CallStore: Send + Sync {
    /// Persist a call record
    ///
    /// The signaling path uses this for missed calls only; completed and
    /// rejected calls are logged by explicit client action.
    async fn create_record(&self, record: CallRecord) -> StoreResult<()>;

    /// Call history involving a user, most recent first
    async fn history(&self, user_id: &UserId) -> StoreResult<Vec<CallRecord>>;
}

/// User profile lookups
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user's display profile
    async fn find_profile(&self, id: &UserId) -> StoreResult<Option<UserProfile>>;
}
