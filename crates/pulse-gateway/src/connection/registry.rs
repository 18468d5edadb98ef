//! Presence registry
//!
//! Sole source of truth for "who is online right now". Owns the mapping from
//! user identity to active connections and the per-group live channels, using
//! `DashMap` for thread-safe access.

use super::{Connection, SessionState};
use pulse_core::{ConnectionId, GroupId, UserId};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// In-memory registry of active connections
///
/// A user appears in `snapshot()` if and only if at least one of their
/// connections is registered; with several devices on one identity the user
/// stays online until the last connection closes.
pub struct PresenceRegistry {
    /// Active connections by connection id
    connections: DashMap<ConnectionId, Arc<Connection>>,

    /// User identity to connection ids mapping
    user_connections: DashMap<UserId, HashSet<ConnectionId>>,

    /// Group channel to connection ids mapping
    group_channels: DashMap<GroupId, HashSet<ConnectionId>>,
}

impl PresenceRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
            group_channels: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a connection
    ///
    /// Anonymous connections (no handshake identity) are tracked by connection
    /// id only and never appear in the online set. Idempotent for the same
    /// connection.
    pub fn register(&self, connection: Arc<Connection>) {
        let id = connection.id();

        if let Some(user_id) = connection.user_id() {
            self.user_connections
                .entry(user_id.clone())
                .or_default()
                .insert(id);
        }

        connection.set_state(SessionState::Active);
        self.connections.insert(id, connection);

        tracing::debug!(connection_id = %id, "Connection registered");
    }

    /// Remove a connection and all of its mappings
    ///
    /// Uses `alter` plus `remove_if` for atomic modify-and-cleanup scoped to
    /// the affected keys, avoiding TOCTOU races and full-map scans.
    pub fn unregister(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        let (_, connection) = self.connections.remove(&id)?;

        if let Some(user_id) = connection.user_id() {
            self.user_connections.alter(user_id, |_, mut conns| {
                conns.remove(&id);
                conns
            });
            self.user_connections
                .remove_if(user_id, |_, conns| conns.is_empty());
        }

        for group_id in connection.groups() {
            connection.leave_group(&group_id);
            self.group_channels.alter(&group_id, |_, mut conns| {
                conns.remove(&id);
                conns
            });
            self.group_channels
                .remove_if(&group_id, |_, conns| conns.is_empty());
        }

        connection.set_state(SessionState::Closed);

        tracing::debug!(connection_id = %id, "Connection unregistered");

        Some(connection)
    }

    /// Resolve one connection for a user, or absent if offline
    pub fn resolve(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.user_connections
            .get(user_id)
            .and_then(|conns| conns.iter().next().copied())
    }

    /// All active connections for a user
    ///
    /// Direct routing fans out to every device a user has connected.
    pub fn resolve_all(&self, user_id: &UserId) -> Vec<Arc<Connection>> {
        self.user_connections
            .get(user_id)
            .map(|conns| {
                conns
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check whether a user has at least one active connection
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.user_connections
            .get(user_id)
            .is_some_and(|conns| !conns.is_empty())
    }

    /// The current online set
    pub fn snapshot(&self) -> Vec<UserId> {
        self.user_connections.iter().map(|e| e.key().clone()).collect()
    }

    /// Get a connection by id
    pub fn get(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(&id).map(|c| c.clone())
    }

    /// All active connections
    pub fn all_connections(&self) -> Vec<Arc<Connection>> {
        self.connections.iter().map(|e| e.value().clone()).collect()
    }

    /// Subscribe a connection to a group channel; re-joining is a no-op
    pub fn join_group(&self, id: ConnectionId, group_id: GroupId) -> bool {
        let Some(connection) = self.connections.get(&id) else {
            return false;
        };

        connection.join_group(group_id.clone());
        self.group_channels.entry(group_id.clone()).or_default().insert(id);

        tracing::trace!(connection_id = %id, group_id = %group_id, "Joined group channel");

        true
    }

    /// Unsubscribe a connection from a group channel; leaving a non-joined
    /// channel is a no-op
    pub fn leave_group(&self, id: ConnectionId, group_id: &GroupId) -> bool {
        let Some(connection) = self.connections.get(&id) else {
            return false;
        };

        connection.leave_group(group_id);
        self.group_channels.alter(group_id, |_, mut conns| {
            conns.remove(&id);
            conns
        });
        self.group_channels
            .remove_if(group_id, |_, conns| conns.is_empty());

        tracing::trace!(connection_id = %id, group_id = %group_id, "Left group channel");

        true
    }

    /// All connections subscribed to a group channel
    pub fn group_connections(&self, group_id: &GroupId) -> Vec<Arc<Connection>> {
        self.group_channels
            .get(group_id)
            .map(|conns| {
                conns
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of distinct online users
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("connections", &self.connections.len())
            .field("users", &self.user_connections.len())
            .field("groups", &self.group_channels.len())
            .finish()
    }
}
