//! Individual realtime connection
//!
//! Represents one WebSocket connection and its state. The user identity is
//! carried in the handshake query string and is immutable for the connection's
//! life; a connection without one is accepted but stays invisible to presence.

use crate::events::ServerEvent;
use parking_lot::RwLock;
use pulse_core::{ConnectionId, GroupId, UserId};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Connection session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Transport established, not yet registered
    Connecting,
    /// Registered and receiving routed events
    Active,
    /// Terminal; teardown has run
    Closed,
}

/// A single realtime connection
pub struct Connection {
    /// Ephemeral connection id, minted at handshake
    id: ConnectionId,

    /// User identity from the handshake query, if any
    user_id: Option<UserId>,

    /// Current session state
    state: RwLock<SessionState>,

    /// Group channels this connection has joined
    groups: RwLock<HashSet<GroupId>>,

    /// Outbound queue toward the WebSocket write task
    ///
    /// A single queue per connection keeps routed events ordered.
    sender: mpsc::Sender<ServerEvent>,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        id: ConnectionId,
        user_id: Option<UserId>,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            user_id,
            state: RwLock::new(SessionState::Connecting),
            groups: RwLock::new(HashSet::new()),
            sender,
        })
    }

    /// Get the connection id
    #[inline]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Get the handshake user identity, if one was supplied
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Check whether the handshake carried a user identity
    pub fn is_identified(&self) -> bool {
        self.user_id.is_some()
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Set the session state
    pub fn set_state(&self, state: SessionState) {
        *self.state.write() = state;
    }

    /// Join a group channel; re-joining is a no-op
    pub fn join_group(&self, group_id: GroupId) -> bool {
        self.groups.write().insert(group_id)
    }

    /// Leave a group channel; leaving a non-joined channel is a no-op
    pub fn leave_group(&self, group_id: &GroupId) -> bool {
        self.groups.write().remove(group_id)
    }

    /// Check membership in a group channel
    pub fn in_group(&self, group_id: &GroupId) -> bool {
        self.groups.read().contains(group_id)
    }

    /// All joined group channels
    pub fn groups(&self) -> Vec<GroupId> {
        self.groups.read().iter().cloned().collect()
    }

    /// Queue an event toward this connection without waiting
    ///
    /// Fails when the write task has gone away or the queue is full; the
    /// caller treats either as a dropped delivery. Never blocks, so one
    /// unresponsive client cannot stall routing for everyone else.
    pub fn try_send(
        &self,
        event: ServerEvent,
    ) -> Result<(), mpsc::error::TrySendError<ServerEvent>> {
        self.sender.try_send(event)
    }

    /// Check whether the write task has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("state", &*self.state.read())
            .finish()
    }
}
