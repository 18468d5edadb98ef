//! Store traits (ports) - define the interface to the persistence collaborator

mod stores;

pub use stores::{CallStore, GroupStore, MessageStore, StoreResult, UserStore};
