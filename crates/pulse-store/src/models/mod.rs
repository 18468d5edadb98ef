//! Database models - SQLx-compatible structs for PostgreSQL tables

mod call;
mod group;
mod message;
mod user;

pub use call::CallModel;
pub use group::{GroupMemberModel, GroupModel};
pub use message::MessageModel;
pub use user::UserModel;
