//! Intern repository trait

use async_trait::async_trait;

use super::entity::{Intern, InternId};
use crate::domain::DomainError;
use crate::domain::storage::DocumentEdit;
use crate::domain::team::TeamId;

/// Repository trait for interns
#[async_trait]
pub trait InternRepository: Send + Sync {
    async fn get(&self, id: &InternId) -> Result<Option<Intern>, DomainError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<Intern>, DomainError>;

    /// Lookup by normalized email
    async fn get_by_email(&self, email: &str) -> Result<Option<Intern>, DomainError>;

    /// All interns affiliated with the organization *named*
    /// `organization_name` whose username is in `usernames`
    async fn find_in_organization_name(
        &self,
        organization_name: &str,
        usernames: &[String],
    ) -> Result<Vec<Intern>, DomainError>;

    /// All interns that list `team_id` in their teams
    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Intern>, DomainError>;

    /// Create a new intern; usernames and emails are unique
    async fn create(&self, intern: Intern) -> Result<Intern, DomainError>;

    async fn update(&self, intern: Intern) -> Result<Intern, DomainError>;

    /// Apply `edit` to the stored intern as one atomic read-modify-write.
    /// Returns `None` if the intern is gone.
    async fn modify(
        &self,
        id: &InternId,
        edit: DocumentEdit<'_, Intern>,
    ) -> Result<Option<Intern>, DomainError>;

    /// Add `team_id` to the intern's teams. Returns false if the intern is
    /// gone or already listed the team.
    async fn add_team(&self, id: &InternId, team_id: &TeamId) -> Result<bool, DomainError>;

    /// Remove `team_id` from the intern's teams. Returns false if the intern
    /// is gone or did not list the team.
    async fn remove_team(&self, id: &InternId, team_id: &TeamId) -> Result<bool, DomainError>;
}
