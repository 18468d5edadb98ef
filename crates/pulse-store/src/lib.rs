//! # pulse-store
//!
//! Persistence layer implementing the store traits from `pulse-core` with
//! PostgreSQL via SQLx. From the signaling core's point of view this crate is
//! the external persistence collaborator: simple create/read/update operations,
//! awaited before any realtime fan-out.

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, PgPool, PoolConfig};
pub use repositories::{PgCallStore, PgGroupStore, PgMessageStore, PgUserStore};
