//! User, artist and identity types
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::CadenceError;

/// Account role. Capabilities are flat predicates on the role rather than a
/// type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Artist,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Artist => "artist",
        }
    }

    /// Whether accounts with this role may upload songs
    pub fn can_upload(self) -> bool {
        matches!(self, Role::Artist)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "artist" => Ok(Role::Artist),
            other => Err(CadenceError::invalid_input(format!("unknown role: {other}"))),
        }
    }
}

/// Who is calling and what they may do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn can_upload(&self) -> bool {
        self.role.can_upload()
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique account name
    pub name: String,

    pub photo: String,

    /// Registration timestamp, `%Y-%m-%dT%H:%M:%S`
    pub register_date: String,

    pub role: Role,

    /// Names of playlists owned by this account
    pub playlists: Vec<String>,
}

/// Artist account: a user that can upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(flatten)]
    pub user: User,

    /// Names of songs uploaded by this artist
    pub uploaded_songs: Vec<String>,
}

/// Data for registering a new account
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub photo: String,
    /// Already hashed; storage never sees plain passwords
    pub password_hash: String,
    pub role: Role,
}
