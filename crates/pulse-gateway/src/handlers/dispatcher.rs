//! Event dispatcher
//!
//! One exhaustive match over the closed client event set. Adding a client
//! event without handling it is a compile error, not a silently ignored
//! frame.

use crate::connection::Connection;
use crate::events::{ClientEvent, ServerEvent, TypingNoticePayload, TypingPayload};
use crate::routing::EventRouter;
use crate::signaling::CallSignaling;
use pulse_core::{GroupId, UserId};
use std::sync::Arc;

use super::HandlerError;

/// Dispatches inbound frames to the right subsystem
pub struct EventDispatcher {
    router: Arc<EventRouter>,
    signaling: Arc<CallSignaling>,
}

impl EventDispatcher {
    /// Create a new dispatcher
    pub fn new(router: Arc<EventRouter>, signaling: Arc<CallSignaling>) -> Self {
        Self { router, signaling }
    }

    /// Handle one inbound text frame
    ///
    /// Errors are reported to the caller for logging only; a bad frame never
    /// terminates the connection.
    pub async fn dispatch(
        &self,
        connection: &Arc<Connection>,
        frame: &str,
    ) -> Result<(), HandlerError> {
        let event = ClientEvent::from_json(frame)?;
        tracing::trace!(connection_id = %connection.id(), event = event.name(), "Dispatching");

        match event {
            ClientEvent::CallUser(payload) => self.signaling.initiate(payload).await,
            ClientEvent::AnswerCall(payload) => self.signaling.answer(payload).await,
            ClientEvent::IceCandidate(payload) => self.signaling.candidate(payload).await,
            ClientEvent::EndCall(payload) => self.signaling.hang_up(payload).await,
            ClientEvent::JoinGroup(group_id) => {
                self.router.registry().join_group(connection.id(), group_id);
            }
            ClientEvent::LeaveGroup(group_id) => {
                self.router.registry().leave_group(connection.id(), &group_id);
            }
            ClientEvent::Typing(payload) => self.typing(connection, payload, true).await?,
            ClientEvent::StopTyping(payload) => self.typing(connection, payload, false).await?,
        }

        Ok(())
    }

    /// Relay a typing indicator
    ///
    /// The notice is attributed to the connection's handshake identity, never
    /// to anything the frame claims, so an anonymous connection cannot type.
    async fn typing(
        &self,
        connection: &Arc<Connection>,
        payload: TypingPayload,
        started: bool,
    ) -> Result<(), HandlerError> {
        let user_id = connection.user_id().ok_or(HandlerError::Unidentified)?.clone();

        if payload.is_group {
            let group_id = GroupId::new(payload.receiver_id);
            let notice = TypingNoticePayload {
                user_id,
                group_id: Some(group_id.clone()),
            };
            let event = if started {
                ServerEvent::Typing(notice)
            } else {
                ServerEvent::StopTyping(notice)
            };
            self.router
                .send_to_group(&group_id, &event, Some(connection.id()))
                .await;
        } else {
            let notice = TypingNoticePayload {
                user_id,
                group_id: None,
            };
            let event = if started {
                ServerEvent::Typing(notice)
            } else {
                ServerEvent::StopTyping(notice)
            };
            self.router
                .send_to_user(&UserId::new(payload.receiver_id), &event)
                .await;
        }

        Ok(())
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher").finish_non_exhaustive()
    }
}
