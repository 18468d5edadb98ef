//! Server-to-client events

use pulse_core::{CallKind, GroupId, Message, MessageId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `callUser` payload as delivered to the callee
///
/// The offer and display metadata pass through untransformed; this core is a
/// signaling relay, not a media relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingCallPayload {
    pub signal: Value,
    pub from: UserId,
    pub name: String,
    pub call_kind: CallKind,
}

/// `newGroupMessage` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroupMessagePayload {
    pub group_id: GroupId,
    pub message: Message,
}

/// `messagesSeen` payload - one event per seen batch, not per message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesSeenPayload {
    pub seen_by: UserId,
    pub sender_id: UserId,
}

/// `typing` / `stop-typing` payload, normalized to one shape for both the
/// direct and group cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingNoticePayload {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

/// Events the server may push over the realtime channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Full online set, broadcast to every connection on each presence change
    #[serde(rename = "getOnlineUsers")]
    OnlineUsers(Vec<UserId>),
    #[serde(rename = "newMessage")]
    NewMessage(Message),
    #[serde(rename = "messageUpdated")]
    MessageUpdated(Message),
    #[serde(rename = "messageDeleted")]
    MessageDeleted(MessageId),
    #[serde(rename = "messagesSeen")]
    MessagesSeen(MessagesSeenPayload),
    #[serde(rename = "newGroupMessage")]
    NewGroupMessage(NewGroupMessagePayload),
    #[serde(rename = "callUser")]
    IncomingCall(IncomingCallPayload),
    /// Raw session-description answer
    #[serde(rename = "callAccepted")]
    CallAccepted(Value),
    /// Raw ICE candidate
    #[serde(rename = "ice-candidate")]
    IceCandidate(Value),
    #[serde(rename = "callEnded")]
    CallEnded,
    #[serde(rename = "typing")]
    Typing(TypingNoticePayload),
    #[serde(rename = "stop-typing")]
    StopTyping(TypingNoticePayload),
}

impl ServerEvent {
    /// Wire name of this event
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OnlineUsers(_) => "getOnlineUsers",
            Self::NewMessage(_) => "newMessage",
            Self::MessageUpdated(_) => "messageUpdated",
            Self::MessageDeleted(_) => "messageDeleted",
            Self::MessagesSeen(_) => "messagesSeen",
            Self::NewGroupMessage(_) => "newGroupMessage",
            Self::IncomingCall(_) => "callUser",
            Self::CallAccepted(_) => "callAccepted",
            Self::IceCandidate(_) => "ice-candidate",
            Self::CallEnded => "callEnded",
            Self::Typing(_) => "typing",
            Self::StopTyping(_) => "stop-typing",
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
