//! Inbound frame handling

mod dispatcher;
mod error;

pub use dispatcher::EventDispatcher;
pub use error::HandlerError;
