//! Gateway test harness
//!
//! Wires `GatewayState` over the in-memory doubles and exposes clients that
//! behave like connected sockets: register through the router, receive
//! routed events on their outbound queue, and feed frames through the
//! dispatcher.

use crate::doubles::{MemoryCallStore, MemoryGroupStore, MemoryMessageStore, MemoryUserStore};
use pulse_common::{AppConfig, AppSettings, DatabaseConfig, Environment, ServerConfig};
use pulse_core::{ConnectionId, UserId};
use pulse_gateway::connection::Connection;
use pulse_gateway::events::ServerEvent;
use pulse_gateway::server::GatewayState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const RECV_TIMEOUT: Duration = Duration::from_millis(200);

/// Configuration for a gateway that never binds a socket or opens a pool
fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "pulse-test".to_string(),
            env: Environment::Development,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            message_buffer: 16,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
    }
}

/// A fully wired gateway over in-memory stores
pub struct TestGateway {
    pub state: GatewayState,
    pub messages: Arc<MemoryMessageStore>,
    pub groups: Arc<MemoryGroupStore>,
    pub calls: Arc<MemoryCallStore>,
    pub users: Arc<MemoryUserStore>,
}

impl TestGateway {
    pub fn new() -> Self {
        let messages = Arc::new(MemoryMessageStore::new());
        let groups = Arc::new(MemoryGroupStore::new());
        let calls = Arc::new(MemoryCallStore::new());
        let users = Arc::new(MemoryUserStore::new());

        let state = GatewayState::new(
            messages.clone(),
            groups.clone(),
            calls.clone(),
            users.clone(),
            test_config(),
        );

        Self {
            state,
            messages,
            groups,
            calls,
            users,
        }
    }

    /// Open a connection, optionally identified, and register it
    pub async fn connect(&self, user: Option<&str>) -> TestClient {
        let (tx, rx) = mpsc::channel(16);
        let connection = Connection::new(ConnectionId::generate(), user.map(UserId::new), tx);
        self.state
            .router()
            .register_connection(connection.clone())
            .await;
        TestClient { connection, rx }
    }

    /// Tear a connection down the same way the socket handler does
    pub async fn disconnect(&self, client: &TestClient) {
        self.state
            .router()
            .unregister_connection(client.connection.id())
            .await;
    }

    /// Feed one inbound frame through the dispatcher
    pub async fn send(&self, client: &TestClient, frame: &str) {
        self.state
            .dispatcher()
            .dispatch(&client.connection, frame)
            .await
            .expect("frame should dispatch");
    }

    /// Feed a frame that is expected to be rejected
    pub async fn send_expect_err(&self, client: &TestClient, frame: &str) {
        assert!(
            self.state
                .dispatcher()
                .dispatch(&client.connection, frame)
                .await
                .is_err(),
            "frame should be rejected"
        );
    }
}

impl Default for TestGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// One simulated client connection
pub struct TestClient {
    pub connection: Arc<Connection>,
    rx: mpsc::Receiver<ServerEvent>,
}

impl TestClient {
    /// Receive the next routed event, failing the test on timeout
    pub async fn recv(&mut self) -> ServerEvent {
        tokio::time::timeout(RECV_TIMEOUT, self.rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("outbound queue closed")
    }

    /// Receive an event if one is already queued
    pub fn try_recv(&mut self) -> Option<ServerEvent> {
        self.rx.try_recv().ok()
    }

    /// Receive the next event and unwrap it as the online set, sorted
    pub async fn recv_online(&mut self) -> Vec<UserId> {
        match self.recv().await {
            ServerEvent::OnlineUsers(mut users) => {
                users.sort_by(|a, b| a.as_str().cmp(b.as_str()));
                users
            }
            other => panic!("expected getOnlineUsers, got {}", other.name()),
        }
    }

    /// Assert no event is queued
    pub fn assert_silent(&mut self) {
        assert!(self.try_recv().is_none(), "expected no queued events");
    }
}
