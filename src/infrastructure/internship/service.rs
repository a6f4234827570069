//! Internship service: posting, listing and applications

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::DomainError;
use crate::domain::intern::{
    ApplicationData, ApplicationRecord, ApplicationStatus, Intern, InternRepository,
};
use crate::domain::internship::{
    Internship, InternshipId, InternshipQuery, InternshipRepository, PostingDetails,
};
use crate::domain::organization::{OrganizationId, OrganizationRef};
use crate::domain::user::UserRepository;

/// Identity of whoever posts an internship
#[derive(Debug, Clone, Default)]
pub struct Poster {
    pub username: String,
    pub organization_name: String,
    pub organization_id: String,
}

/// Request for posting an internship
#[derive(Debug, Clone)]
pub struct PostInternshipRequest {
    pub poster: Poster,
    pub details: PostingDetails,
}

/// Request for moving an application to a new status
#[derive(Debug, Clone)]
pub struct UpdateApplicationRequest {
    /// Username of the reviewing admin
    pub reviewer: String,
    pub status: ApplicationStatus,
    pub interview_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Internship service
#[derive(Debug)]
pub struct InternshipService<P, I, U>
where
    P: InternshipRepository,
    I: InternRepository,
    U: UserRepository,
{
    internships: Arc<P>,
    interns: Arc<I>,
    users: Arc<U>,
}

impl<P, I, U> InternshipService<P, I, U>
where
    P: InternshipRepository,
    I: InternRepository,
    U: UserRepository,
{
    pub fn new(internships: Arc<P>, interns: Arc<I>, users: Arc<U>) -> Self {
        Self {
            internships,
            interns,
            users,
        }
    }

    /// Post an internship on behalf of the poster's organization
    pub async fn post(&self, request: PostInternshipRequest) -> Result<Internship, DomainError> {
        let Poster {
            username,
            organization_name,
            organization_id,
        } = request.poster;

        if username.trim().is_empty() {
            return Err(DomainError::validation("userData.username is required"));
        }

        let organization_id = OrganizationId::new(organization_id)
            .map_err(|_| DomainError::validation("userData.organizationId is required"))?;

        request.details.validate()?;

        let internship = Internship::new(
            InternshipId::generate(),
            username.trim(),
            OrganizationRef::new(organization_id, organization_name),
            request.details,
        );

        info!(
            internship_id = %internship.id(),
            posted_by = %internship.posted_by(),
            organization = %internship.organization_id(),
            deadline = ?internship.application_deadline(),
            "Posting internship"
        );

        self.internships.create(internship).await
    }

    /// List postings, newest first. With `hide_expired`, postings whose
    /// deadline passed before today (UTC) or that have no deadline are left
    /// out.
    pub async fn list(
        &self,
        organization_id: Option<&str>,
        hide_expired: bool,
    ) -> Result<Vec<Internship>, DomainError> {
        self.list_at(organization_id, hide_expired, Utc::now()).await
    }

    pub(crate) async fn list_at(
        &self,
        organization_id: Option<&str>,
        hide_expired: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Internship>, DomainError> {
        let mut query = InternshipQuery::new();

        if let Some(org) = organization_id.filter(|o| !o.trim().is_empty()) {
            query = query.with_organization(
                OrganizationId::new(org).map_err(DomainError::validation)?,
            );
        }

        if hide_expired {
            query = query.hide_expired_at(now);
        }

        self.internships.list(&query).await
    }

    /// Apply to an internship as an intern
    pub async fn apply(
        &self,
        internship_id: &str,
        username: &str,
        application_data: ApplicationData,
    ) -> Result<ApplicationRecord, DomainError> {
        let internship = self.get_internship(internship_id).await?;

        if internship.is_expired_at(Utc::now()) {
            return Err(DomainError::validation("Application deadline has passed"));
        }

        let intern = self.intern(username).await?;

        let intern = self
            .interns
            .modify(intern.id(), &mut |intern: &mut Intern| {
                intern.apply(&internship, application_data.clone())?;
                Ok(true)
            })
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Intern '{}' not found", username)))?;
        let record = Self::stored_application(&intern, internship.id())?;

        info!(internship_id = %internship.id(), username, "Application submitted");
        Ok(record)
    }

    /// Move an intern's application to a new status; admins of the posting
    /// organization only
    pub async fn update_application(
        &self,
        internship_id: &str,
        intern_username: &str,
        request: UpdateApplicationRequest,
    ) -> Result<ApplicationRecord, DomainError> {
        let internship = self.get_internship(internship_id).await?;

        let authorized = self
            .users
            .get_by_username(&request.reviewer)
            .await?
            .is_some_and(|u| u.is_admin() && u.organization_id() == internship.organization_id());

        if !authorized {
            warn!(reviewer = %request.reviewer, internship_id, "Rejected application update");
            return Err(DomainError::forbidden(
                "Only admins of the posting organization can update applications",
            ));
        }

        if request.status.is_intern_response() {
            return Err(DomainError::validation(format!(
                "Status '{}' can only be set by the intern",
                request.status
            )));
        }

        let intern = self.intern(intern_username).await?;

        let intern = self
            .interns
            .modify(intern.id(), &mut |intern: &mut Intern| {
                intern.update_application(
                    internship.id(),
                    request.status,
                    request.interview_date,
                    request.notes.clone(),
                )?;
                Ok(true)
            })
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Intern '{}' not found", intern_username))
            })?;
        let record = Self::stored_application(&intern, internship.id())?;

        info!(
            internship_id = %internship.id(),
            intern = intern_username,
            status = %record.status,
            "Application updated"
        );
        Ok(record)
    }

    async fn intern(&self, username: &str) -> Result<Intern, DomainError> {
        self.interns
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Intern '{}' not found", username)))
    }

    fn stored_application(
        intern: &Intern,
        internship_id: &InternshipId,
    ) -> Result<ApplicationRecord, DomainError> {
        intern.application(internship_id).cloned().ok_or_else(|| {
            DomainError::internal(format!(
                "Application to '{}' missing after write",
                internship_id
            ))
        })
    }

    async fn get_internship(&self, id: &str) -> Result<Internship, DomainError> {
        let not_found = || DomainError::not_found(format!("Internship '{}' not found", id));
        let id = InternshipId::new(id).map_err(|_| not_found())?;

        self.internships.get(&id).await?.ok_or_else(not_found)
    }
}
