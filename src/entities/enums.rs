//! Enumerations - Role names shared by users and permission checks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    UserManager,
    GroupManager,
    SummaryEngineer,
    MentorCoach,
    MenteeManager,
    Mentor,
    TransactionalMentor,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::UserManager,
        Role::GroupManager,
        Role::SummaryEngineer,
        Role::MentorCoach,
        Role::MenteeManager,
        Role::Mentor,
        Role::TransactionalMentor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::UserManager => "UserManager",
            Role::GroupManager => "GroupManager",
            Role::SummaryEngineer => "SummaryEngineer",
            Role::MentorCoach => "MentorCoach",
            Role::MenteeManager => "MenteeManager",
            Role::Mentor => "Mentor",
            Role::TransactionalMentor => "TransactionalMentor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// Role list as stored in the `users.roles` text array
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Roles(pub Vec<Role>);

impl Roles {
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// An empty `permitted` list always passes, otherwise any shared role passes
    pub fn is_permitted(&self, permitted: &[Role]) -> bool {
        permitted.is_empty() || self.0.iter().any(|r| permitted.contains(r))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|r| r.as_str().to_string()).collect()
    }
}

impl From<Vec<String>> for Roles {
    fn from(raw: Vec<String>) -> Self {
        let roles = raw
            .iter()
            .filter_map(|name| match name.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    warn!("Skipping unknown role stored in database: {}", name);
                    None
                }
            })
            .collect();
        Roles(roles)
    }
}

impl From<Vec<Role>> for Roles {
    fn from(roles: Vec<Role>) -> Self {
        Roles(roles)
    }
}
