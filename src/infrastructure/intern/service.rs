//! Intern service: registration, profile review and dashboard status

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::DomainError;
use crate::domain::intern::{
    DashboardStatus, Intern, InternId, InternProfile, InternRepository, VerificationStatus,
};
use crate::domain::organization::{Affiliation, OrganizationId};
use crate::domain::user::{UserRepository, validate_username};

/// Request for registering an intern
#[derive(Debug, Clone, Default)]
pub struct RegisterInternRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub organization_name: Option<String>,
    pub organization_id: Option<String>,
}

/// Intern service
#[derive(Debug)]
pub struct InternService<I: InternRepository, U: UserRepository> {
    interns: Arc<I>,
    users: Arc<U>,
}

impl<I: InternRepository, U: UserRepository> InternService<I, U> {
    pub fn new(interns: Arc<I>, users: Arc<U>) -> Self {
        Self { interns, users }
    }

    /// Register a new intern, optionally already affiliated
    pub async fn register(&self, request: RegisterInternRequest) -> Result<Intern, DomainError> {
        let username = request.username.trim();
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;

        let affiliation = match request
            .organization_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            Some(name) => {
                let organization_id = request
                    .organization_id
                    .as_deref()
                    .filter(|id| !id.trim().is_empty())
                    .map(OrganizationId::new)
                    .transpose()
                    .map_err(DomainError::validation)?;
                Affiliation::member(organization_id, name)
            }
            None => Affiliation::Unaffiliated,
        };

        let profile = InternProfile {
            full_name: request.full_name,
            ..Default::default()
        };

        let intern = Intern::new(InternId::generate(), username, &request.email, affiliation)
            .map_err(|e| DomainError::validation(e.to_string()))?
            .with_profile(profile);

        info!(
            username,
            affiliated = intern.affiliation().is_member(),
            "Registering intern"
        );

        self.interns.create(intern).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Intern, DomainError> {
        self.interns
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Intern '{}' not found", username)))
    }

    /// Store the submitted profile and queue it for review
    pub async fn submit_profile(
        &self,
        username: &str,
        profile: InternProfile,
    ) -> Result<Intern, DomainError> {
        let intern = self.get_by_username(username).await?;

        let intern = self
            .interns
            .modify(intern.id(), &mut |intern: &mut Intern| {
                intern.submit_profile(profile.clone());
                Ok(true)
            })
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Intern '{}' not found", username)))?;

        info!(username, state = ?intern.profile_state(), "Profile submitted");
        Ok(intern)
    }

    /// Record an admin's verification decision
    pub async fn review(
        &self,
        reviewer: &str,
        username: &str,
        status: VerificationStatus,
    ) -> Result<Intern, DomainError> {
        let admin = match self.users.get_by_username(reviewer).await? {
            Some(user) if user.is_admin() => user,
            _ => {
                warn!(reviewer, "Rejected verification from non-admin");
                return Err(DomainError::forbidden("Only admins can verify interns"));
            }
        };

        let intern = self.get_by_username(username).await?;

        // Affiliation is checked on the locked copy, since it can change under us
        let intern = self
            .interns
            .modify(intern.id(), &mut |intern: &mut Intern| {
                if let Some(name) = intern.affiliation().organization_name() {
                    if name != admin.organization_name() {
                        return Err(DomainError::forbidden(
                            "Intern belongs to another organization",
                        ));
                    }
                }

                intern.review(status)?;
                Ok(true)
            })
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Intern '{}' not found", username)))?;

        info!(
            reviewer,
            username,
            status = ?status,
            state = ?intern.profile_state(),
            "Intern reviewed"
        );
        Ok(intern)
    }

    /// What the intern's dashboard shows in its onboarding area
    pub async fn dashboard(&self, username: &str) -> Result<DashboardStatus, DomainError> {
        let intern = self.get_by_username(username).await?;
        Ok(DashboardStatus::for_intern(&intern))
    }
}
