//! Store implementations backed by PostgreSQL

mod call;
mod error;
mod group;
mod message;
mod user;

pub use call::PgCallStore;
pub use group::PgGroupStore;
pub use message::PgMessageStore;
pub use user::PgUserStore;
