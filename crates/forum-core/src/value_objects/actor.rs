//! Actor identity - who is performing an operation
//!
//! Identity is always passed explicitly into service calls as `Option<&Actor>`;
//! `None` means the request is anonymous.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Snowflake;

/// Role of an actor on the platform
///
/// Upstream identity payloads are inconsistent about the shape of this field:
/// some send `"moderator"`, others `{"value": "moderator"}`. Both deserialize
/// into the same variant, and unknown role names fall back to [`ActorRole::Member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorRole {
    #[default]
    Member,
    Instructor,
    Moderator,
    Admin,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Instructor => "instructor",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }

    /// Parse a role name, case-insensitively. Unknown names map to `Member`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" => Self::Admin,
            "moderator" | "mod" => Self::Moderator,
            "instructor" | "teacher" => Self::Instructor,
            _ => Self::Member,
        }
    }

    /// Moderators and admins may pin discussions
    #[inline]
    pub fn can_moderate(&self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActorRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RoleShape {
            Bare(String),
            Wrapped { value: String },
        }

        let role = match RoleShape::deserialize(deserializer)? {
            RoleShape::Bare(name) | RoleShape::Wrapped { value: name } => name,
        };
        Ok(Self::from_name(&role))
    }
}

/// An authenticated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Snowflake,
    #[serde(default)]
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: Snowflake, role: ActorRole) -> Self {
        Self { id, role }
    }

    pub fn member(id: Snowflake) -> Self {
        Self::new(id, ActorRole::Member)
    }
}
