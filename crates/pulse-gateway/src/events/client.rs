//! Client-to-server events

use pulse_core::{CallKind, GroupId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `callUser` payload - start a call attempt toward another user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallUserPayload {
    /// Identity of the callee
    pub user_to_call: UserId,
    /// Session description offer, relayed verbatim
    pub signal_data: Value,
    /// Caller identity
    pub from: UserId,
    /// Caller display name, relayed verbatim
    pub name: String,
    /// Media kind; defaults to video to match older clients
    #[serde(default = "default_call_kind")]
    pub call_kind: CallKind,
}

fn default_call_kind() -> CallKind {
    CallKind::Video
}

/// `answerCall` payload - accept a ringing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCallPayload {
    /// Identity of the original caller
    pub to: UserId,
    /// Session description answer, relayed verbatim
    pub signal: Value,
}

/// `ice-candidate` payload - one ICE candidate for the counterparty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidatePayload {
    pub to: UserId,
    /// Candidate payload, relayed verbatim
    pub candidate: Value,
}

/// `endCall` payload - hang up or reject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallPayload {
    pub to: UserId,
}

/// `typing` / `stop-typing` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    /// Target user for direct chats, target group for group chats
    pub receiver_id: String,
    #[serde(default)]
    pub is_group: bool,
}

/// Events a client may send over the realtime channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "callUser")]
    CallUser(CallUserPayload),
    #[serde(rename = "answerCall")]
    AnswerCall(AnswerCallPayload),
    #[serde(rename = "ice-candidate")]
    IceCandidate(IceCandidatePayload),
    #[serde(rename = "endCall")]
    EndCall(EndCallPayload),
    #[serde(rename = "joinGroup")]
    JoinGroup(GroupId),
    #[serde(rename = "leaveGroup")]
    LeaveGroup(GroupId),
    #[serde(rename = "typing")]
    Typing(TypingPayload),
    #[serde(rename = "stop-typing")]
    StopTyping(TypingPayload),
}

impl ClientEvent {
    /// Wire name of this event
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CallUser(_) => "callUser",
            Self::AnswerCall(_) => "answerCall",
            Self::IceCandidate(_) => "ice-candidate",
            Self::EndCall(_) => "endCall",
            Self::JoinGroup(_) => "joinGroup",
            Self::LeaveGroup(_) => "leaveGroup",
            Self::Typing(_) => "typing",
            Self::StopTyping(_) => "stop-typing",
        }
    }

    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
