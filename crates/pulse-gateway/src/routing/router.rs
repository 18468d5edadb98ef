//! Event router
//!
//! Thin delivery layer over the presence registry. Routing to an offline user
//! is a silent no-op; a full outbound queue drops the event for that
//! connection with a warning rather than stalling the router.

use crate::connection::{Connection, PresenceRegistry};
use crate::events::ServerEvent;
use pulse_core::{ConnectionId, GroupId, UserId};
use std::sync::Arc;

/// Routes server events to connections via the registry
pub struct EventRouter {
    registry: Arc<PresenceRegistry>,
}

impl EventRouter {
    /// Create a new router over a registry
    #[must_use]
    pub fn new(registry: Arc<PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry
    #[must_use]
    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    /// Register a connection and re-broadcast the online set
    ///
    /// Every presence change pushes the full online list to every connection,
    /// identified or not.
    pub async fn register_connection(&self, connection: Arc<Connection>) {
        self.registry.register(connection);
        self.broadcast_online().await;
    }

    /// Unregister a connection and re-broadcast the online set
    pub async fn unregister_connection(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        let connection = self.registry.unregister(id)?;
        self.broadcast_online().await;
        Some(connection)
    }

    /// Deliver an event to every connection a user has
    ///
    /// Returns the number of connections reached; zero means the user is
    /// offline.
    pub async fn send_to_user(&self, user_id: &UserId, event: &ServerEvent) -> usize {
        let connections = self.registry.resolve_all(user_id);
        if connections.is_empty() {
            tracing::trace!(user_id = %user_id, event = event.name(), "Target offline, dropping");
            return 0;
        }

        let mut delivered = 0;
        for connection in connections {
            if self.deliver(&connection, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver an event to every connection in a group channel, optionally
    /// excluding one connection
    pub async fn send_to_group(
        &self,
        group_id: &GroupId,
        event: &ServerEvent,
        exclude: Option<ConnectionId>,
    ) -> usize {
        let mut delivered = 0;
        for connection in self.registry.group_connections(group_id) {
            if exclude.is_some_and(|id| id == connection.id()) {
                continue;
            }
            if self.deliver(&connection, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver an event to a user's connections subscribed to a group channel
    ///
    /// Group-message delivery requires both current membership (the caller's
    /// concern) and an active channel subscription; a connection that left
    /// the channel receives nothing.
    pub async fn send_to_user_in_group(
        &self,
        user_id: &UserId,
        group_id: &GroupId,
        event: &ServerEvent,
    ) -> usize {
        let mut delivered = 0;
        for connection in self.registry.resolve_all(user_id) {
            if !connection.in_group(group_id) {
                continue;
            }
            if self.deliver(&connection, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver an event to every active connection
    pub async fn broadcast(&self, event: &ServerEvent) -> usize {
        let mut delivered = 0;
        for connection in self.registry.all_connections() {
            if self.deliver(&connection, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Push the current online set to every connection
    pub async fn broadcast_online(&self) {
        let online = self.registry.snapshot();
        tracing::debug!(online_count = online.len(), "Broadcasting online set");
        self.broadcast(&ServerEvent::OnlineUsers(online)).await;
    }

    fn deliver(&self, connection: &Arc<Connection>, event: ServerEvent) -> bool {
        use tokio::sync::mpsc::error::TrySendError;

        match connection.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    connection_id = %connection.id(),
                    event = event.name(),
                    "Outbound queue full, dropping event"
                );
                false
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(
                    connection_id = %connection.id(),
                    event = event.name(),
                    "Outbound queue gone, dropping event"
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("registry", &self.registry)
            .finish()
    }
}
