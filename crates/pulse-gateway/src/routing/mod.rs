//! Event routing over the presence registry

mod router;

pub use router::EventRouter;
