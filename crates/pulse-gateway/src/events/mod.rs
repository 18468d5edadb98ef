//! Realtime wire events
//!
//! Every frame on the realtime channel is one JSON object of the form
//! `{"event": <name>, "data": <payload>}`. The event names form a closed set,
//! modeled as tagged enums so the dispatcher's match is exhaustive.

mod client;
mod server;

pub use client::{AnswerCallPayload, CallUserPayload, ClientEvent, EndCallPayload, IceCandidatePayload, TypingPayload};
pub use server::{IncomingCallPayload, MessagesSeenPayload, NewGroupMessagePayload, ServerEvent, TypingNoticePayload};
