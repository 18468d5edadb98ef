//! Integration test support
//!
//! In-memory doubles for the store collaborators plus a harness that wires
//! the full gateway without a network listener or database. Tests drive the
//! gateway through the same dispatcher and router the WebSocket handler
//! uses.

pub mod doubles;
pub mod harness;

pub use doubles::{MemoryCallStore, MemoryGroupStore, MemoryMessageStore, MemoryUserStore};
pub use harness::{TestClient, TestGateway};
