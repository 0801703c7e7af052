use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::traits::Identity;

/// Role of the local user in the current room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// Represents the local user of the client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Member,
        }
    }

    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Admin,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl Identity for User {
    fn current_user(&self) -> String {
        self.username.clone()
    }

    fn is_privileged(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}
