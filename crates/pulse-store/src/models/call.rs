//! Call record database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use pulse_core::{CallKind, CallRecord, CallStatus, UserId};

/// Database model for the calls table
#[derive(Debug, Clone, FromRow)]
pub struct CallModel {
    pub caller_id: String,
    pub receiver_id: String,
    pub kind: String,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: i64,
}

impl From<CallModel> for CallRecord {
    fn from(model: CallModel) -> Self {
        CallRecord {
            caller_id: UserId::new(model.caller_id),
            receiver_id: UserId::new(model.receiver_id),
            kind: match model.kind.as_str() {
                "audio" => CallKind::Audio,
                _ => CallKind::Video,
            },
            status: match model.status.as_str() {
                "missed" => CallStatus::Missed,
                "rejected" => CallStatus::Rejected,
                _ => CallStatus::Completed,
            },
            start_time: model.start_time,
            end_time: model.end_time,
            duration: model.duration,
        }
    }
}
