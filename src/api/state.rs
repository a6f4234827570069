//! Application state for shared services

use std::sync::Arc;

use crate::domain::intern::{
    ApplicationData, ApplicationRecord, DashboardStatus, Intern, InternProfile, InternRepository,
    VerificationStatus,
};
use crate::domain::internship::{Internship, InternshipRepository};
use crate::domain::organization::OrganizationId;
use crate::domain::team::{Team, TeamRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::intern::{InternService, RegisterInternRequest};
use crate::infrastructure::internship::{
    InternshipService, PostInternshipRequest, UpdateApplicationRequest,
};
use crate::infrastructure::storage::DocumentStore;
use crate::infrastructure::team::{CreateTeamRequest, EditTeamRequest, ReconcileReport, TeamService};
use crate::infrastructure::user::{CreateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub intern_service: Arc<dyn InternServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub internship_service: Arc<dyn InternshipServiceTrait>,
    pub store: DocumentStore,
}

/// Trait for staff user operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<User, DomainError>;
}

/// Trait for intern onboarding operations
#[async_trait::async_trait]
pub trait InternServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterInternRequest) -> Result<Intern, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Intern, DomainError>;
    async fn submit_profile(
        &self,
        username: &str,
        profile: InternProfile,
    ) -> Result<Intern, DomainError>;
    async fn review(
        &self,
        reviewer: &str,
        username: &str,
        status: VerificationStatus,
    ) -> Result<Intern, DomainError>;
    async fn dashboard(&self, username: &str) -> Result<DashboardStatus, DomainError>;
}

/// Trait for team operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn edit_team(&self, request: EditTeamRequest) -> Result<Team, DomainError>;
    async fn list_teams(&self, requester: &str) -> Result<Vec<Team>, DomainError>;
    async fn reconcile(
        &self,
        organization_id: Option<&OrganizationId>,
    ) -> Result<ReconcileReport, DomainError>;
}

/// Trait for internship operations
#[async_trait::async_trait]
pub trait InternshipServiceTrait: Send + Sync {
    async fn post(&self, request: PostInternshipRequest) -> Result<Internship, DomainError>;
    async fn list(
        &self,
        organization_id: Option<&str>,
        hide_expired: bool,
    ) -> Result<Vec<Internship>, DomainError>;
    async fn apply(
        &self,
        internship_id: &str,
        username: &str,
        application_data: ApplicationData,
    ) -> Result<ApplicationRecord, DomainError>;
    async fn update_application(
        &self,
        internship_id: &str,
        intern_username: &str,
        request: UpdateApplicationRequest,
    ) -> Result<ApplicationRecord, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        UserService::get_by_username(self, username).await
    }
}

#[async_trait::async_trait]
impl<I, U> InternServiceTrait for InternService<I, U>
where
    I: InternRepository + 'static,
    U: UserRepository + 'static,
{
    async fn register(&self, request: RegisterInternRequest) -> Result<Intern, DomainError> {
        InternService::register(self, request).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Intern, DomainError> {
        InternService::get_by_username(self, username).await
    }

    async fn submit_profile(
        &self,
        username: &str,
        profile: InternProfile,
    ) -> Result<Intern, DomainError> {
        InternService::submit_profile(self, username, profile).await
    }

    async fn review(
        &self,
        reviewer: &str,
        username: &str,
        status: VerificationStatus,
    ) -> Result<Intern, DomainError> {
        InternService::review(self, reviewer, username, status).await
    }

    async fn dashboard(&self, username: &str) -> Result<DashboardStatus, DomainError> {
        InternService::dashboard(self, username).await
    }
}

#[async_trait::async_trait]
impl<T, U, I> TeamServiceTrait for TeamService<T, U, I>
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    I: InternRepository + 'static,
{
    async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create_team(self, request).await
    }

    async fn edit_team(&self, request: EditTeamRequest) -> Result<Team, DomainError> {
        TeamService::edit_team(self, request).await
    }

    async fn list_teams(&self, requester: &str) -> Result<Vec<Team>, DomainError> {
        TeamService::list_teams(self, requester).await
    }

    async fn reconcile(
        &self,
        organization_id: Option<&OrganizationId>,
    ) -> Result<ReconcileReport, DomainError> {
        TeamService::reconcile(self, organization_id).await
    }
}

#[async_trait::async_trait]
impl<P, I, U> InternshipServiceTrait for InternshipService<P, I, U>
where
    P: InternshipRepository + 'static,
    I: InternRepository + 'static,
    U: UserRepository + 'static,
{
    async fn post(&self, request: PostInternshipRequest) -> Result<Internship, DomainError> {
        InternshipService::post(self, request).await
    }

    async fn list(
        &self,
        organization_id: Option<&str>,
        hide_expired: bool,
    ) -> Result<Vec<Internship>, DomainError> {
        InternshipService::list(self, organization_id, hide_expired).await
    }

    async fn apply(
        &self,
        internship_id: &str,
        username: &str,
        application_data: ApplicationData,
    ) -> Result<ApplicationRecord, DomainError> {
        InternshipService::apply(self, internship_id, username, application_data).await
    }

    async fn update_application(
        &self,
        internship_id: &str,
        intern_username: &str,
        request: UpdateApplicationRequest,
    ) -> Result<ApplicationRecord, DomainError> {
        InternshipService::update_application(self, internship_id, intern_username, request).await
    }
}
