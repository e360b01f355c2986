//! Group DTOs

use super::{PublicUserDTO, TranscriptDTO};
use crate::entities::Group;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct GroupDTO {
    pub id: Uuid,
    pub name: Option<String>,
    pub users: Vec<PublicUserDTO>,
    pub transcripts: Vec<TranscriptDTO>,
}

impl GroupDTO {
    pub fn from_parts(
        group: Group,
        users: Vec<PublicUserDTO>,
        transcripts: Vec<TranscriptDTO>,
    ) -> Self {
        Self {
            id: group.id,
            name: group.name,
            users,
            transcripts,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeetingLinkDTO {
    pub meeting_link: String,
}
