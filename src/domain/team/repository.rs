//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;
use crate::domain::organization::OrganizationId;

#[cfg(test)]
use mockall::automock;

/// Repository for managing teams
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Get a team by its name within an organization
    async fn find_by_name(
        &self,
        organization_id: &OrganizationId,
        team_name: &str,
    ) -> Result<Option<Team>, DomainError>;

    /// Create a new team; names are unique per organization
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team, `NotFound` if it no longer exists
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// List all teams, sorted by name
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// List the teams of one organization, sorted by name
    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Team>, DomainError>;
}
