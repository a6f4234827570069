//! User service for onboarding staff

use std::sync::Arc;

use tracing::info;

use crate::domain::DomainError;
use crate::domain::organization::{OrganizationId, OrganizationRef};
use crate::domain::user::{User, UserId, UserRepository, UserRole, validate_username};

/// Request for onboarding a staff user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub organization_id: String,
    pub organization_name: String,
    pub role: String,
}

/// User service for staff management
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Onboard a staff user into an organization
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let username = request.username.trim();
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;

        let role = request
            .role
            .parse::<UserRole>()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let organization_id =
            OrganizationId::new(&request.organization_id).map_err(DomainError::validation)?;

        let organization_name = request.organization_name.trim();
        if organization_name.is_empty() {
            return Err(DomainError::validation("Organization name is required"));
        }

        info!(username, %organization_id, %role, "Onboarding user");

        let user = User::new(
            UserId::generate(),
            username,
            OrganizationRef::new(organization_id, organization_name),
            role,
        );

        self.repository.create(user).await
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::StorageUserRepository;

    fn create_service() -> UserService<StorageUserRepository> {
        let storage = Arc::new(InMemoryStorage::<User>::new());
        UserService::new(Arc::new(StorageUserRepository::new(storage)))
    }

    fn request(username: &str, role: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            organization_id: "org-acme".to_string(),
            organization_name: "Acme".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = create_service();

        let user = service.create(request(" alice ", "Admin")).await.unwrap();

        assert_eq!(user.username(), "alice");
        assert_eq!(user.role(), UserRole::Admin);
        assert_eq!(user.organization_name(), "Acme");
    }

    #[tokio::test]
    async fn test_create_user_invalid_input() {
        let service = create_service();

        assert!(matches!(
            service.create(request("al", "mentor")).await,
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            service.create(request("alice", "intern")).await,
            Err(DomainError::Validation { .. })
        ));

        let mut no_org = request("alice", "mentor");
        no_org.organization_id = " ".to_string();
        assert!(matches!(
            service.create(no_org).await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let service = create_service();
        service.create(request("alice", "mentor")).await.unwrap();

        let result = service.create(request("alice", "panelist")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let service = create_service();
        service.create(request("alice", "mentor")).await.unwrap();

        assert_eq!(
            service.get_by_username("alice").await.unwrap().username(),
            "alice"
        );
        assert!(matches!(
            service.get_by_username("bob").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
