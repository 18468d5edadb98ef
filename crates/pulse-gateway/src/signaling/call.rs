//! Call signaling
//!
//! Relays WebRTC session descriptions and ICE candidates between peers. The
//! server never inspects or stores signal payloads; it only resolves the
//! target user and forwards. No ringing state is held server-side, so every
//! operation is a stateless relay.

use crate::events::{
    AnswerCallPayload, CallUserPayload, EndCallPayload, IceCandidatePayload, IncomingCallPayload,
    ServerEvent,
};
use crate::routing::EventRouter;
use pulse_core::{CallRecord, CallStore, UserId};
use std::sync::Arc;

/// Relays call-signaling events between peers
pub struct CallSignaling {
    router: Arc<EventRouter>,
    calls: Arc<dyn CallStore>,
}

impl CallSignaling {
    /// Create a new signaling relay
    pub fn new(router: Arc<EventRouter>, calls: Arc<dyn CallStore>) -> Self {
        Self { router, calls }
    }

    /// Start a call attempt
    ///
    /// If the callee has at least one active connection, the offer is relayed
    /// as-is. Otherwise exactly one missed-call record is persisted and
    /// nothing is relayed; the caller learns about the miss through the call
    /// history, not a realtime event.
    pub async fn initiate(&self, payload: CallUserPayload) {
        let callee = payload.user_to_call.clone();

        if self.router.registry().is_online(&callee) {
            let event = ServerEvent::IncomingCall(IncomingCallPayload {
                signal: payload.signal_data,
                from: payload.from,
                name: payload.name,
                call_kind: payload.call_kind,
            });
            self.router.send_to_user(&callee, &event).await;
            return;
        }

        tracing::debug!(
            caller = %payload.from,
            callee = %callee,
            "Callee offline, recording missed call"
        );
        self.record_missed(CallRecord::missed(payload.from, callee, payload.call_kind));
    }

    /// Relay a session-description answer back to the caller
    pub async fn answer(&self, payload: AnswerCallPayload) {
        self.relay(&payload.to, ServerEvent::CallAccepted(payload.signal))
            .await;
    }

    /// Relay one ICE candidate to the counterparty
    pub async fn candidate(&self, payload: IceCandidatePayload) {
        self.relay(&payload.to, ServerEvent::IceCandidate(payload.candidate))
            .await;
    }

    /// Relay a hang-up to the counterparty
    pub async fn hang_up(&self, payload: EndCallPayload) {
        self.relay(&payload.to, ServerEvent::CallEnded).await;
    }

    async fn relay(&self, to: &UserId, event: ServerEvent) {
        let delivered = self.router.send_to_user(to, &event).await;
        if delivered == 0 {
            tracing::trace!(target = %to, event = event.name(), "Signaling target offline");
        }
    }

    /// Persist a missed-call record without blocking the signaling path
    fn record_missed(&self, record: CallRecord) {
        let calls = self.calls.clone();
        tokio::spawn(async move {
            if let Err(err) = calls.create_record(record).await {
                tracing::error!(error = %err, "Failed to persist missed call");
            }
        });
    }
}

impl std::fmt::Debug for CallSignaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallSignaling").finish_non_exhaustive()
    }
}
