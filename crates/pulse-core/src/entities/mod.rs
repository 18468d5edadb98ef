//! Domain entities - core business objects

mod call;
mod group;
mod message;
mod user;

pub use call::{CallKind, CallRecord, CallStatus};
pub use group::Group;
pub use message::{Message, MessageFlags};
pub use user::UserProfile;
