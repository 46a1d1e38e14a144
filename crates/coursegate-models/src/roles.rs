//! The fixed set of roles.
//!
//! A user holds exactly one role; a course's audience is a set of roles.
//! [`Role::Developer`] is the privileged role: it manages the catalog and can
//! never be self-assigned at registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use coursegate_core::DomainError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Normal,
    Student,
    #[serde(alias = "social-manager")]
    SocialManager,
    Developer,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Normal,
        Role::Student,
        Role::SocialManager,
        Role::Developer,
    ];

    /// Roles allowed to create, update, and delete courses.
    pub const CATALOG_MANAGERS: [Role; 1] = [Role::Developer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Normal => "normal",
            Role::Student => "student",
            Role::SocialManager => "social_manager",
            Role::Developer => "developer",
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Developer)
    }

    /// Parses a role name supplied at registration.
    ///
    /// Unknown names are a validation failure; a privileged role is
    /// forbidden. Absent or blank input yields [`Role::Normal`].
    pub fn for_registration(requested: Option<&str>) -> Result<Role, DomainError> {
        let requested = match requested.map(str::trim) {
            None | Some("") => return Ok(Role::default()),
            Some(name) => name,
        };

        let role: Role = requested.parse()?;
        if role.is_privileged() {
            return Err(DomainError::forbidden(
                "Developer role can only be assigned by administrators",
            ));
        }

        Ok(role)
    }

    fn allowed_names() -> String {
        Role::ALL
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Role::Normal),
            "student" => Ok(Role::Student),
            "social_manager" | "social-manager" => Ok(Role::SocialManager),
            "developer" => Ok(Role::Developer),
            _ => Err(DomainError::validation(format!(
                "Invalid role. Allowed roles: {}",
                Role::allowed_names()
            ))),
        }
    }
}
