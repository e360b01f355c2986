//! Repositories module - Database access for every entity
//!
//! Each repository owns a clone of the connection pool and exposes the
//! queries of one table (plus the joins that start from it).
//!
//! Queries are built with the runtime `sqlx::query_as::<_, T>()` API and
//! `FromRow` entities, so the crate builds without a live database.
//! Column identifiers of the legacy schema are camelCase and must be quoted.

pub mod chat;
pub mod group;
pub mod mentorship;
pub mod summary;
pub mod traits;
pub mod transcript;
pub mod user;

// Re-export traits
pub use traits::{Create, Read, ReadMany, Update};

pub use chat::ChatRepository;
pub use group::GroupRepository;
pub use mentorship::MentorshipRepository;
pub use summary::SummaryRepository;
pub use transcript::TranscriptRepository;
pub use user::UserRepository;

/// Pool alias, so switching database only touches one line
pub type PoolType = sqlx::PgPool;
