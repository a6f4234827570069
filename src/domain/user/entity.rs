//! Staff user entity and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{UserValidationError, validate_user_id};
use crate::domain::organization::{OrganizationId, OrganizationRef};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// User identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role of a staff user within their organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Manages teams, internships and intern verification
    Admin,
    /// Guides interns on a team
    Mentor,
    /// Evaluates intern demos
    Panelist,
    #[default]
    Employee,
}

impl UserRole {
    /// Check if this role may create and edit teams
    pub fn can_manage_teams(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::str::FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "mentor" => Ok(Self::Mentor),
            "panelist" => Ok(Self::Panelist),
            "employee" => Ok(Self::Employee),
            other => Err(UserValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Mentor => write!(f, "mentor"),
            Self::Panelist => write!(f, "panelist"),
            Self::Employee => write!(f, "employee"),
        }
    }
}

/// Staff member of an organization (admin, mentor, panelist or employee)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: String,
    #[serde(flatten)]
    organization: OrganizationRef,
    role: UserRole,
    /// Teams this user mentors or evaluates
    #[serde(default)]
    teams: BTreeSet<TeamId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        organization: OrganizationRef,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: username.into(),
            organization,
            role,
            teams: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn organization(&self) -> &OrganizationRef {
        &self.organization
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization.organization_id
    }

    pub fn organization_name(&self) -> &str {
        &self.organization.organization_name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn teams(&self) -> &BTreeSet<TeamId> {
        &self.teams
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_admin(&self) -> bool {
        self.role.can_manage_teams()
    }

    // Mutators

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.touch();
    }

    /// Add a team back-reference. Returns false if it was already present.
    pub fn join_team(&mut self, team_id: TeamId) -> bool {
        let added = self.teams.insert(team_id);

        if added {
            self.touch();
        }
        added
    }

    /// Remove a team back-reference. Returns false if it was not present.
    pub fn leave_team(&mut self, team_id: &TeamId) -> bool {
        let removed = self.teams.remove(team_id);

        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for User {
    type Key = UserId;
    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELDS: &'static [&'static [&'static str]] = &[&["username"]];

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
