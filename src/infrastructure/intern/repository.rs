//! Storage-backed intern repository implementation

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::intern::{Intern, InternId, InternRepository};
use crate::domain::storage::{DocumentEdit, Storage};
use crate::domain::team::TeamId;

/// Storage-backed implementation of InternRepository
#[derive(Debug)]
pub struct StorageInternRepository {
    storage: Arc<dyn Storage<Intern>>,
}

impl StorageInternRepository {
    pub fn new(storage: Arc<dyn Storage<Intern>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl InternRepository for StorageInternRepository {
    async fn get(&self, id: &InternId) -> Result<Option<Intern>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Intern>, DomainError> {
        self.storage
            .find_one(&|intern: &Intern| intern.username() == username)
            .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Intern>, DomainError> {
        self.storage
            .find_one(&|intern: &Intern| intern.email() == email)
            .await
    }

    async fn find_in_organization_name(
        &self,
        organization_name: &str,
        usernames: &[String],
    ) -> Result<Vec<Intern>, DomainError> {
        let wanted: HashSet<&str> = usernames.iter().map(String::as_str).collect();

        self.storage
            .find(&|intern: &Intern| {
                intern.affiliation().organization_name() == Some(organization_name)
                    && wanted.contains(intern.username())
            })
            .await
    }

    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Intern>, DomainError> {
        self.storage
            .find(&|intern: &Intern| intern.teams().contains(team_id))
            .await
    }

    async fn create(&self, intern: Intern) -> Result<Intern, DomainError> {
        let username = intern.username().to_string();
        let email = intern.email().to_string();

        let result = self
            .storage
            .create_unique(intern, &|stored: &Intern| {
                stored.username() == username || stored.email() == email
            })
            .await;

        match result {
            Err(DomainError::Conflict { .. }) => {
                if self.get_by_username(&username).await?.is_some() {
                    Err(DomainError::conflict(format!(
                        "Username '{}' already exists",
                        username
                    )))
                } else {
                    Err(DomainError::conflict(format!(
                        "Email '{}' is already registered",
                        email
                    )))
                }
            }
            other => other,
        }
    }

    async fn update(&self, intern: Intern) -> Result<Intern, DomainError> {
        self.storage.update(intern).await
    }

    async fn modify(
        &self,
        id: &InternId,
        edit: DocumentEdit<'_, Intern>,
    ) -> Result<Option<Intern>, DomainError> {
        self.storage.modify(id, edit).await
    }

    async fn add_team(&self, id: &InternId, team_id: &TeamId) -> Result<bool, DomainError> {
        let mut added = false;
        self.storage
            .modify(id, &mut |intern: &mut Intern| {
                added = intern.join_team(team_id.clone());
                Ok(added)
            })
            .await?;
        Ok(added)
    }

    async fn remove_team(&self, id: &InternId, team_id: &TeamId) -> Result<bool, DomainError> {
        let mut removed = false;
        self.storage
            .modify(id, &mut |intern: &mut Intern| {
                removed = intern.leave_team(team_id);
                Ok(removed)
            })
            .await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::Affiliation;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::storage::yielding::YieldingStorage;

    fn create_repo() -> StorageInternRepository {
        StorageInternRepository::new(Arc::new(InMemoryStorage::<Intern>::new()))
    }

    fn create_intern(username: &str, organization: Option<&str>) -> Intern {
        let affiliation = match organization {
            Some(name) => Affiliation::member(None, name),
            None => Affiliation::Unaffiliated,
        };

        Intern::new(
            InternId::generate(),
            username,
            &format!("{}@example.com", username),
            affiliation,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = create_repo();
        let intern = repo.create(create_intern("ada", None)).await.unwrap();

        let by_name = repo.get_by_username("ada").await.unwrap().unwrap();
        let by_email = repo.get_by_email("ada@example.com").await.unwrap().unwrap();

        assert_eq!(by_name.id(), intern.id());
        assert_eq!(by_email.id(), intern.id());
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        let repo = create_repo();
        repo.create(create_intern("ada", None)).await.unwrap();

        let same_name = repo.create(create_intern("ada", Some("Acme"))).await;
        assert!(matches!(same_name, Err(DomainError::Conflict { .. })));

        let same_email = Intern::new(
            InternId::generate(),
            "ada2",
            "ADA@example.com",
            Affiliation::Unaffiliated,
        )
        .unwrap();
        let result = repo.create(same_email).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_in_organization_name() {
        let repo = create_repo();
        repo.create(create_intern("ada", Some("Acme"))).await.unwrap();
        repo.create(create_intern("bob", Some("Globex"))).await.unwrap();
        repo.create(create_intern("cy", None)).await.unwrap();

        let found = repo
            .find_in_organization_name(
                "Acme",
                &["ada".to_string(), "bob".to_string(), "cy".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username(), "ada");
    }

    #[tokio::test]
    async fn test_team_back_references() {
        let repo = create_repo();
        let intern = repo.create(create_intern("ada", Some("Acme"))).await.unwrap();
        let team = TeamId::generate();

        assert!(repo.add_team(intern.id(), &team).await.unwrap());
        assert!(!repo.add_team(intern.id(), &team).await.unwrap());
        assert_eq!(repo.find_by_team(&team).await.unwrap().len(), 1);

        assert!(repo.remove_team(intern.id(), &team).await.unwrap());
        assert!(repo.find_by_team(&team).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_team_joins_and_leaves() {
        let repo = StorageInternRepository::new(Arc::new(YieldingStorage::<Intern>::new()));
        let intern = repo.create(create_intern("ada", Some("Acme"))).await.unwrap();
        let (old, design, platform) = (TeamId::generate(), TeamId::generate(), TeamId::generate());
        repo.add_team(intern.id(), &old).await.unwrap();

        let (left, a, b) = tokio::join!(
            repo.remove_team(intern.id(), &old),
            repo.add_team(intern.id(), &design),
            repo.add_team(intern.id(), &platform)
        );
        assert!(left.unwrap() && a.unwrap() && b.unwrap());

        let stored = repo.get(intern.id()).await.unwrap().unwrap();
        assert!(!stored.teams().contains(&old));
        assert!(stored.teams().contains(&design));
        assert!(stored.teams().contains(&platform));
    }

    #[tokio::test]
    async fn test_concurrent_registrations_with_same_email() {
        let repo = StorageInternRepository::new(Arc::new(YieldingStorage::<Intern>::new()));
        let first = Intern::new(
            InternId::generate(),
            "ada",
            "shared@example.com",
            Affiliation::Unaffiliated,
        )
        .unwrap();
        let second = Intern::new(
            InternId::generate(),
            "grace",
            "shared@example.com",
            Affiliation::Unaffiliated,
        )
        .unwrap();

        let (a, b) = tokio::join!(repo.create(first), repo.create(second));

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let loser = if a.is_ok() { b } else { a };
        match loser {
            Err(DomainError::Conflict { message }) => assert!(message.starts_with("Email")),
            other => panic!("expected email conflict, got {:?}", other),
        }
    }
}
