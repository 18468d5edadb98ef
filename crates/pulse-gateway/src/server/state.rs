//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::PresenceRegistry;
use crate::handlers::EventDispatcher;
use crate::reconcile::DeliveryFanout;
use crate::routing::EventRouter;
use crate::signaling::CallSignaling;
use pulse_common::AppConfig;
use pulse_core::{CallStore, GroupStore, MessageStore, UserStore};
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server. Stores are held
/// behind trait objects so tests can substitute in-memory doubles.
#[derive(Clone)]
pub struct GatewayState {
    /// Presence registry for active connections
    registry: Arc<PresenceRegistry>,
    /// Event router over the registry
    router: Arc<EventRouter>,
    /// Inbound frame dispatcher
    dispatcher: Arc<EventDispatcher>,
    /// Persisted-message fan-out layer
    fanout: Arc<DeliveryFanout>,
    /// Message store, exposed for the persist-then-notify flow
    messages: Arc<dyn MessageStore>,
    /// User profile lookups for discovery surfaces
    users: Arc<dyn UserStore>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Wire up the gateway from its stores and configuration
    pub fn new(
        messages: Arc<dyn MessageStore>,
        groups: Arc<dyn GroupStore>,
        calls: Arc<dyn CallStore>,
        users: Arc<dyn UserStore>,
        config: AppConfig,
    ) -> Self {
        let registry = PresenceRegistry::new_shared();
        let router = Arc::new(EventRouter::new(registry.clone()));
        let signaling = Arc::new(CallSignaling::new(router.clone(), calls));
        let dispatcher = Arc::new(EventDispatcher::new(router.clone(), signaling));
        let fanout = Arc::new(DeliveryFanout::new(router.clone(), groups));

        Self {
            registry,
            router,
            dispatcher,
            fanout,
            messages,
            users,
            config: Arc::new(config),
        }
    }

    /// Get the presence registry
    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    /// Get the event router
    pub fn router(&self) -> &Arc<EventRouter> {
        &self.router
    }

    /// Get the frame dispatcher
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Get the delivery fan-out layer
    pub fn fanout(&self) -> &DeliveryFanout {
        &self.fanout
    }

    /// Get the message store
    pub fn messages(&self) -> &Arc<dyn MessageStore> {
        &self.messages
    }

    /// Get the user store
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish()
    }
}
