//! Storage-backed user repository implementation

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::organization::OrganizationId;
use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId, UserRepository};

/// Storage-backed implementation of UserRepository
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.storage
            .find_one(&|user: &User| user.username() == username)
            .await
    }

    async fn find_in_organization(
        &self,
        organization_id: &OrganizationId,
        usernames: &[String],
    ) -> Result<Vec<User>, DomainError> {
        let wanted: HashSet<&str> = usernames.iter().map(String::as_str).collect();

        self.storage
            .find(&|user: &User| {
                user.organization_id() == organization_id && wanted.contains(user.username())
            })
            .await
    }

    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<User>, DomainError> {
        self.storage
            .find(&|user: &User| user.teams().contains(team_id))
            .await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let username = user.username().to_string();

        self.storage
            .create_unique(user, &|stored: &User| stored.username() == username)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => {
                    DomainError::conflict(format!("Username '{}' already exists", username))
                }
                other => other,
            })
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.storage.update(user).await
    }

    async fn add_team(&self, id: &UserId, team_id: &TeamId) -> Result<bool, DomainError> {
        let mut added = false;
        self.storage
            .modify(id, &mut |user: &mut User| {
                added = user.join_team(team_id.clone());
                Ok(added)
            })
            .await?;
        Ok(added)
    }

    async fn remove_team(&self, id: &UserId, team_id: &TeamId) -> Result<bool, DomainError> {
        let mut removed = false;
        self.storage
            .modify(id, &mut |user: &mut User| {
                removed = user.leave_team(team_id);
                Ok(removed)
            })
            .await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::OrganizationRef;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::user::UserRole;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::storage::yielding::YieldingStorage;

    fn create_repo() -> StorageUserRepository {
        StorageUserRepository::new(Arc::new(InMemoryStorage::<User>::new()))
    }

    fn org(id: &str) -> OrganizationId {
        OrganizationId::new(id).unwrap()
    }

    fn create_user(username: &str, organization: &str, role: UserRole) -> User {
        User::new(
            UserId::generate(),
            username,
            OrganizationRef::new(org(organization), "Acme"),
            role,
        )
    }

    fn names(users: &[User]) -> Vec<String> {
        let mut names: Vec<_> = users.iter().map(|u| u.username().to_string()).collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_create_and_get_by_username() {
        let repo = create_repo();
        let user = repo
            .create(create_user("alice", "org-1", UserRole::Admin))
            .await
            .unwrap();

        let found = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id(), user.id());
        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = create_repo();
        repo.create(create_user("alice", "org-1", UserRole::Admin))
            .await
            .unwrap();

        let result = repo
            .create(create_user("alice", "org-2", UserRole::Mentor))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_in_organization_is_scoped() {
        let repo = create_repo();
        repo.create(create_user("alice", "org-1", UserRole::Mentor))
            .await
            .unwrap();
        repo.create(create_user("bob", "org-1", UserRole::Panelist))
            .await
            .unwrap();
        repo.create(create_user("carol", "org-2", UserRole::Mentor))
            .await
            .unwrap();

        let found = repo
            .find_in_organization(
                &org("org-1"),
                &["alice".to_string(), "carol".to_string(), "zed".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(names(&found), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_add_and_remove_team() {
        let repo = create_repo();
        let user = repo
            .create(create_user("alice", "org-1", UserRole::Mentor))
            .await
            .unwrap();
        let team = TeamId::generate();

        assert!(repo.add_team(user.id(), &team).await.unwrap());
        assert!(!repo.add_team(user.id(), &team).await.unwrap());
        assert_eq!(names(&repo.find_by_team(&team).await.unwrap()), vec!["alice"]);

        assert!(repo.remove_team(user.id(), &team).await.unwrap());
        assert!(!repo.remove_team(user.id(), &team).await.unwrap());
        assert!(repo.find_by_team(&team).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_team_to_missing_user() {
        let repo = create_repo();
        let added = repo
            .add_team(&UserId::generate(), &TeamId::generate())
            .await
            .unwrap();
        assert!(!added);
    }

    #[tokio::test]
    async fn test_concurrent_team_links_both_land() {
        let repo = StorageUserRepository::new(Arc::new(YieldingStorage::<User>::new()));
        let user = repo
            .create(create_user("alice", "org-1", UserRole::Mentor))
            .await
            .unwrap();
        let (design, platform) = (TeamId::generate(), TeamId::generate());

        let (a, b) = tokio::join!(
            repo.add_team(user.id(), &design),
            repo.add_team(user.id(), &platform)
        );
        assert!(a.unwrap() && b.unwrap());

        let stored = repo.get(user.id()).await.unwrap().unwrap();
        assert!(stored.teams().contains(&design));
        assert!(stored.teams().contains(&platform));
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_username() {
        let repo = StorageUserRepository::new(Arc::new(YieldingStorage::<User>::new()));

        let (first, second) = tokio::join!(
            repo.create(create_user("alice", "org-1", UserRole::Admin)),
            repo.create(create_user("alice", "org-2", UserRole::Mentor))
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let loser = if first.is_ok() { second } else { first };
        assert!(matches!(loser, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let repo = StorageUserRepository::new(Arc::new(
            MockStorage::<User>::new().with_error("connection reset"),
        ));

        let result = repo.get_by_username("alice").await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
