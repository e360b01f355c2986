//! Application State - repositories, clients and configuration shared by
//! every route and middleware.

use crate::core::UserCache;
use crate::meeting::TencentMeetingClient;
use crate::migration::SchemaMigrator;
use crate::repositories::{
    ChatRepository, GroupRepository, MentorshipRepository, PoolType, SummaryRepository,
    TranscriptRepository, UserRepository,
};
use std::time::Duration;

pub struct AppState {
    pub user: UserRepository,

    pub group: GroupRepository,

    pub transcript: TranscriptRepository,

    pub summary: SummaryRepository,

    pub mentorship: MentorshipRepository,

    pub chat: ChatRepository,

    /// Runs the one-shot legacy schema migration
    pub migrator: SchemaMigrator,

    /// Client of the video-conferencing provider
    pub meeting: TencentMeetingClient,

    /// Secret key for JWT tokens
    pub jwt_secret: String,

    /// Shared secret of integration endpoints; `None` disables them
    pub integration_auth_token: Option<String>,

    pub user_cache: UserCache,
}

impl AppState {
    /// Creates the state, initializing every repository with the given pool.
    ///
    /// # Arguments
    /// * `pool` - Shared Postgres connection pool
    /// * `meeting` - Meeting provider client
    /// * `jwt_secret` - Key used to verify user tokens
    /// * `integration_auth_token` - Shared secret of integration endpoints
    /// * `user_cache_ttl` - How long an authenticated user is cached
    pub fn new(
        pool: PoolType,
        meeting: TencentMeetingClient,
        jwt_secret: String,
        integration_auth_token: Option<String>,
        user_cache_ttl: Duration,
    ) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            group: GroupRepository::new(pool.clone()),
            transcript: TranscriptRepository::new(pool.clone()),
            summary: SummaryRepository::new(pool.clone()),
            mentorship: MentorshipRepository::new(pool.clone()),
            chat: ChatRepository::new(pool.clone()),
            migrator: SchemaMigrator::new(pool),
            meeting,
            jwt_secret,
            integration_auth_token,
            user_cache: UserCache::new(user_cache_ttl),
        }
    }
}
