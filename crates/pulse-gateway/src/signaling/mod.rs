//! WebRTC call-signaling relay

mod call;

pub use call::CallSignaling;
