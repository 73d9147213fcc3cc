//! Parish member DTOs and role handling.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role label within a parish.
///
/// Known roles get their own variant; anything else the server sends is kept
/// verbatim in `Other` so it survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Minister,
    Lector,
    #[default]
    Member,
    Other(String),
}

impl Role {
    /// Roles offered when inviting a new member, in menu order.
    pub const INVITABLE: [Role; 4] = [Role::Member, Role::Admin, Role::Minister, Role::Lector];

    /// Wire label.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Minister => "minister",
            Role::Lector => "lector",
            Role::Member => "member",
            Role::Other(label) => label,
        }
    }

    /// Capitalized label for menus.
    pub fn display_name(&self) -> String {
        let label = self.as_str();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        match label.as_str() {
            "admin" => Role::Admin,
            "minister" => Role::Minister,
            "lector" => Role::Lector,
            "member" => Role::Member,
            _ => Role::Other(label),
        }
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Role::from(label.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canned role sets offered in a member's action menu.
///
/// Applying a preset replaces the member's whole role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePreset {
    MakeAdmin,
    MakeMember,
}

impl RolePreset {
    pub fn label(&self) -> &'static str {
        match self {
            RolePreset::MakeAdmin => "Make Admin",
            RolePreset::MakeMember => "Make Member",
        }
    }

    /// The role set sent to the server.
    pub fn roles(&self) -> Vec<Role> {
        match self {
            RolePreset::MakeAdmin => vec![Role::Admin],
            RolePreset::MakeMember => vec![Role::Member],
        }
    }

    /// Whether applying this preset would be a no-op for the given roles.
    pub fn is_disabled_for(&self, roles: &[Role]) -> bool {
        match self {
            RolePreset::MakeAdmin => roles.contains(&Role::Admin),
            RolePreset::MakeMember => roles == [Role::Member],
        }
    }
}

/// Account details joined onto a membership row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A user's membership in a parish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParishMember {
    pub user_id: String,
    pub roles: Vec<Role>,
    pub users: Option<UserProfile>,
}

impl ParishMember {
    fn email(&self) -> Option<&str> {
        self.users
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .filter(|e| !e.is_empty())
    }

    fn full_name(&self) -> Option<&str> {
        self.users
            .as_ref()
            .and_then(|u| u.full_name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Primary line in the roster: name, else e-mail, else a shortened id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name() {
            return name.to_string();
        }
        if let Some(email) = self.email() {
            return email.to_string();
        }
        let short: String = self.user_id.chars().take(8).collect();
        format!("User {short}...")
    }

    /// Secondary line in the roster.
    pub fn subtitle(&self) -> String {
        if let (Some(email), Some(name)) = (self.email(), self.full_name())
            && email != name
        {
            return email.to_string();
        }
        match self.users.as_ref().and_then(|u| u.created_at) {
            Some(created) => format!("Member since {}", created.format("%Y-%m-%d")),
            None => format!("User ID: {}", self.user_id),
        }
    }

    /// Name shown in the remove confirmation.
    pub fn confirmation_label(&self) -> String {
        self.email().unwrap_or("Unknown").to_string()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

/// Result of an invitation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteOutcome {
    pub message: String,
    /// True when the e-mail matched an existing account and the user was added.
    #[serde(rename = "userExists")]
    pub user_exists: bool,
}
