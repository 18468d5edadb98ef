//! Call record entity - one persisted call attempt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Kind of media negotiated for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Audio,
    Video,
}

impl CallKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// Final outcome of a call attempt
///
/// `Missed` is assigned by the signaling path when the callee has no active
/// connection; `Completed` and `Rejected` are reported by the client after
/// hangup through the call-log flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Completed,
    Missed,
    Rejected,
}

impl CallStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Rejected => "rejected",
        }
    }
}

/// Persisted record of one call attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub caller_id: UserId,
    pub receiver_id: UserId,
    pub kind: CallKind,
    pub status: CallStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Duration in seconds; zero for missed calls
    pub duration: i64,
}

impl CallRecord {
    /// Create a missed-call record for a callee with no active connection
    pub fn missed(caller_id: UserId, receiver_id: UserId, kind: CallKind) -> Self {
        let now = Utc::now();
        Self {
            caller_id,
            receiver_id,
            kind,
            status: CallStatus::Missed,
            start_time: now,
            end_time: Some(now),
            duration: 0,
        }
    }
}
