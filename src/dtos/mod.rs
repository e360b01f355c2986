//! DTOs module - Data Transfer Objects
//!
//! DTOs separate the API representation from the persisted entities.

pub mod group;
pub mod mentorship;
pub mod query;
pub mod transcript;
pub mod user;

pub use group::{GroupDTO, MeetingLinkDTO};
pub use mentorship::{ChatMessageDTO, CreateChatMessageDTO, MentorshipDTO};
pub use query::UserSearchQuery;
pub use transcript::{MostRecentStartedAtDTO, SummaryDTO, TranscriptDTO};
pub use user::{
    CreateUserDTO, PublicUserDTO, SearchUsersResponseDTO, UpdateUserDTO, UserChangesDTO,
    UserProfileDTO,
};
