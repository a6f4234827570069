//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;
use crate::domain::organization::OrganizationId;
use crate::domain::team::TeamId;

/// Repository trait for staff users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// All users of an organization whose username is in `usernames`
    async fn find_in_organization(
        &self,
        organization_id: &OrganizationId,
        usernames: &[String],
    ) -> Result<Vec<User>, DomainError>;

    /// All users that list `team_id` in their teams
    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<User>, DomainError>;

    /// Create a new user; usernames are unique
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Add `team_id` to the user's teams. Returns false if the user is gone
    /// or already listed the team.
    async fn add_team(&self, id: &UserId, team_id: &TeamId) -> Result<bool, DomainError>;

    /// Remove `team_id` from the user's teams. Returns false if the user is
    /// gone or did not list the team.
    async fn remove_team(&self, id: &UserId, team_id: &TeamId) -> Result<bool, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}
