//! Reconciling persisted message state with live connections

mod fanout;

pub use fanout::DeliveryFanout;
