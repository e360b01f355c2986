//! Entities module - Domain entities
//!
//! Every entity maps a row of a database table. Column names follow the
//! camelCase convention of the legacy schema, hence the `sqlx(rename)`s.

pub mod chat;
pub mod enums;
pub mod group;
pub mod mentorship;
pub mod transcript;
pub mod user;

// Re-exports
pub use chat::{ChatMessage, ChatRoom};
pub use enums::{Role, Roles};
pub use group::{Group, GroupUser};
pub use mentorship::Mentorship;
pub use transcript::{Summary, Transcript};
pub use user::User;
