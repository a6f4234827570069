//! Storage-backed team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::organization::OrganizationId;
use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamId, TeamRepository};

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_name(
        &self,
        organization_id: &OrganizationId,
        team_name: &str,
    ) -> Result<Option<Team>, DomainError> {
        self.storage
            .find_one(&|team: &Team| {
                team.organization_id() == organization_id && team.team_name() == team_name
            })
            .await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let organization_id = team.organization_id().clone();
        let team_name = team.team_name().to_string();

        self.storage
            .create_unique(team, &|stored: &Team| {
                stored.organization_id() == &organization_id && stored.team_name() == team_name
            })
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => DomainError::conflict(format!(
                    "Team '{}' already exists in this organization",
                    team_name
                )),
                other => other,
            })
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.update(team).await.map_err(|e| match e {
            DomainError::NotFound { .. } => DomainError::not_found("Team not found"),
            other => other,
        })
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams = self.storage.list().await?;
        teams.sort_by(|a, b| a.team_name().cmp(b.team_name()));
        Ok(teams)
    }

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Team>, DomainError> {
        let mut teams = self
            .storage
            .find(&|team: &Team| team.organization_id() == organization_id)
            .await?;
        teams.sort_by(|a, b| a.team_name().cmp(b.team_name()));
        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::storage::yielding::YieldingStorage;

    fn create_repo() -> StorageTeamRepository {
        StorageTeamRepository::new(Arc::new(InMemoryStorage::<Team>::new()))
    }

    fn org(id: &str) -> OrganizationId {
        OrganizationId::new(id).unwrap()
    }

    fn create_team(name: &str, organization: &str) -> Team {
        Team::new(TeamId::generate(), name, org(organization), "A team").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_name() {
        let repo = create_repo();
        let team = repo.create(create_team("Platform", "org-1")).await.unwrap();

        let found = repo.find_by_name(&org("org-1"), "Platform").await.unwrap();
        assert_eq!(found.map(|t| t.id().clone()), Some(team.id().clone()));

        assert!(repo
            .find_by_name(&org("org-2"), "Platform")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_team_name_unique_per_organization() {
        let repo = create_repo();
        repo.create(create_team("Platform", "org-1")).await.unwrap();

        let duplicate = repo.create(create_team("Platform", "org-1")).await;
        assert!(matches!(duplicate, Err(DomainError::Conflict { .. })));

        // Same name in another organization is fine
        assert!(repo.create(create_team("Platform", "org-2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_creates_of_same_team() {
        let repo = StorageTeamRepository::new(Arc::new(YieldingStorage::<Team>::new()));

        let (first, second) = tokio::join!(
            repo.create(create_team("Platform", "org-1")),
            repo.create(create_team("Platform", "org-1"))
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let loser = if first.is_ok() { second } else { first };
        match loser {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Team 'Platform' already exists in this organization")
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
        assert_eq!(repo.list_by_organization(&org("org-1")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_vanished_team() {
        let repo = create_repo();

        let result = repo.update(create_team("Ghost", "org-1")).await;

        match result {
            Err(DomainError::NotFound { message }) => assert_eq!(message, "Team not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let repo = create_repo();
        repo.create(create_team("Zeta", "org-1")).await.unwrap();
        repo.create(create_team("Alpha", "org-1")).await.unwrap();
        repo.create(create_team("Beta", "org-2")).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|t| t.team_name().to_string())
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Zeta"]);

        let org_teams = repo.list_by_organization(&org("org-1")).await.unwrap();
        assert_eq!(org_teams.len(), 2);
        assert_eq!(org_teams[0].team_name(), "Alpha");
    }
}
