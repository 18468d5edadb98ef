//! # pulse-gateway
//!
//! Realtime presence and signaling core: tracks which users are connected,
//! routes ephemeral events (messages, typing, call signaling) to the correct
//! live connections, and reconciles that with persisted state.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod reconcile;
pub mod routing;
pub mod server;
pub mod signaling;

pub use server::run;
