//! Error handling utilities for store implementations

use pulse_core::{DomainError, GroupId, MessageId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "message not found" error
pub fn message_not_found(id: &MessageId) -> DomainError {
    DomainError::MessageNotFound(id.clone())
}

/// Create a "group not found" error
pub fn group_not_found(id: &GroupId) -> DomainError {
    DomainError::GroupNotFound(id.clone())
}
