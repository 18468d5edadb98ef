//! Handler errors
//!
//! None of these terminate the connection; the receive loop logs them and
//! keeps reading frames.

use thiserror::Error;

/// Errors from handling one inbound frame
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The frame was not valid JSON or named an unknown event
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    /// The operation requires a handshake identity the connection lacks
    #[error("Connection is not identified")]
    Unidentified,
}
