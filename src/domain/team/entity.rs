//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::membership::Membership;
use super::validation::{
    TeamValidationError, validate_team_description, validate_team_id, validate_team_name,
};
use crate::domain::organization::OrganizationId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Team identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Team entity: a named group of mentors, panelists and interns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    id: TeamId,
    /// Unique within the organization
    team_name: String,
    organization_id: OrganizationId,
    #[serde(flatten)]
    members: Membership,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with no members
    pub fn new(
        id: TeamId,
        team_name: impl Into<String>,
        organization_id: OrganizationId,
        description: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let team_name = team_name.into().trim().to_string();
        let description = description.into();
        validate_team_name(&team_name)?;
        validate_team_description(&description)?;
        let now = Utc::now();

        Ok(Self {
            id,
            team_name,
            organization_id,
            members: Membership::default(),
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set members (builder pattern)
    pub fn with_members(mut self, members: Membership) -> Self {
        self.members = members;
        self
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    pub fn members(&self) -> &Membership {
        &self.members
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Replace the member sets and description in one step
    pub fn rewrite(
        &mut self,
        members: Membership,
        description: impl Into<String>,
    ) -> Result<(), TeamValidationError> {
        let description = description.into();
        validate_team_description(&description)?;
        self.members = members;
        self.description = description;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Team {
    type Key = TeamId;
    const COLLECTION: &'static str = "teams";
    const UNIQUE_FIELDS: &'static [&'static [&'static str]] = &[&["organizationId", "teamName"]];

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
