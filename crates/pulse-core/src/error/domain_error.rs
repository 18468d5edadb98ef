//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{GroupId, MessageId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error("Not a member of group {0}")]
    NotAMember(GroupId),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a database error from any displayable source
    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
