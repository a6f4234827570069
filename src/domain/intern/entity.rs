//! Intern entity and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::application::{ApplicationData, ApplicationRecord, ApplicationStatus};
use super::records::{
    Demo, Feedback, InternProfile, Notification, NotificationKind, Preferences, TeamAssignment,
    WeeklyReport,
};
use super::validation::{InternValidationError, normalize_email, validate_intern_id};
use crate::domain::DomainError;
use crate::domain::internship::{Internship, InternshipId};
use crate::domain::organization::Affiliation;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// Intern identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InternId(String);

impl InternId {
    pub fn new(id: impl Into<String>) -> Result<Self, InternValidationError> {
        let id = id.into();
        validate_intern_id(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InternId {
    type Error = InternValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InternId> for String {
    fn from(id: InternId) -> Self {
        id.0
    }
}

impl std::fmt::Display for InternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for InternId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of the admin review of an intern's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("Unknown verification status '{}'", other)),
        }
    }
}

/// Progress of the profile submission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProfileState {
    #[default]
    NotSubmitted,
    /// Profile sent for review `submissions` times in the current cycle
    Submitted { submissions: u32 },
    /// Verified without an organization; the intern should apply to one
    AwaitingOrganization,
}

/// Intern entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intern {
    id: InternId,
    username: String,
    email: String,
    #[serde(default)]
    affiliation: Affiliation,
    #[serde(default)]
    verification_status: VerificationStatus,
    #[serde(default)]
    profile_state: ProfileState,
    #[serde(default)]
    profile: InternProfile,
    #[serde(default)]
    teams: BTreeSet<TeamId>,
    #[serde(default)]
    applied_internships: Vec<ApplicationRecord>,
    #[serde(default)]
    assigned_teams: Vec<TeamAssignment>,
    #[serde(default)]
    weekly_reports: Vec<WeeklyReport>,
    #[serde(default)]
    feedback: Vec<Feedback>,
    #[serde(default)]
    notifications: Vec<Notification>,
    #[serde(default)]
    demo: Demo,
    #[serde(default)]
    preferences: Preferences,
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_login_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Intern {
    /// Create a new intern; the email is normalized
    pub fn new(
        id: InternId,
        username: impl Into<String>,
        email: &str,
        affiliation: Affiliation,
    ) -> Result<Self, InternValidationError> {
        let email = normalize_email(email)?;
        let now = Utc::now();

        Ok(Self {
            id,
            username: username.into(),
            email,
            affiliation,
            verification_status: VerificationStatus::Pending,
            profile_state: ProfileState::NotSubmitted,
            profile: InternProfile::default(),
            teams: BTreeSet::new(),
            applied_internships: Vec::new(),
            assigned_teams: Vec::new(),
            weekly_reports: Vec::new(),
            feedback: Vec::new(),
            notifications: Vec::new(),
            demo: Demo::default(),
            preferences: Preferences::default(),
            is_active: true,
            last_login_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the initial profile (builder pattern)
    pub fn with_profile(mut self, profile: InternProfile) -> Self {
        self.profile = profile;
        self
    }

    // Getters

    pub fn id(&self) -> &InternId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn affiliation(&self) -> &Affiliation {
        &self.affiliation
    }

    pub fn verification_status(&self) -> VerificationStatus {
        self.verification_status
    }

    pub fn profile_state(&self) -> ProfileState {
        self.profile_state
    }

    pub fn profile(&self) -> &InternProfile {
        &self.profile
    }

    pub fn teams(&self) -> &BTreeSet<TeamId> {
        &self.teams
    }

    pub fn applications(&self) -> &[ApplicationRecord] {
        &self.applied_internships
    }

    pub fn assigned_teams(&self) -> &[TeamAssignment] {
        &self.assigned_teams
    }

    pub fn weekly_reports(&self) -> &[WeeklyReport] {
        &self.weekly_reports
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn demo(&self) -> &Demo {
        &self.demo
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn application(&self, internship_id: &InternshipId) -> Option<&ApplicationRecord> {
        self.applied_internships
            .iter()
            .find(|a| &a.internship_id == internship_id)
    }

    // Team back-references

    /// Add a team back-reference. Returns false if it was already present.
    pub fn join_team(&mut self, team_id: TeamId) -> bool {
        let added = self.teams.insert(team_id);

        if added {
            self.touch();
        }
        added
    }

    /// Remove a team back-reference. Returns false if it was not present.
    pub fn leave_team(&mut self, team_id: &TeamId) -> bool {
        let removed = self.teams.remove(team_id);

        if removed {
            self.touch();
        }
        removed
    }

    // Profile review

    /// Record a profile submission; review starts over
    pub fn submit_profile(&mut self, profile: InternProfile) {
        let submissions = match self.profile_state {
            ProfileState::Submitted { submissions } => submissions + 1,
            _ => 1,
        };

        self.profile = profile;
        self.profile_state = ProfileState::Submitted { submissions };
        self.verification_status = VerificationStatus::Pending;
        self.touch();
    }

    /// Apply an admin review decision
    pub fn review(&mut self, status: VerificationStatus) -> Result<(), DomainError> {
        if self.profile_state == ProfileState::NotSubmitted {
            return Err(DomainError::validation(
                "Profile has not been submitted for verification",
            ));
        }

        self.verification_status = status;

        if status == VerificationStatus::Verified && !self.affiliation.is_member() {
            self.profile_state = ProfileState::AwaitingOrganization;
        }

        self.touch();
        Ok(())
    }

    // Applications

    /// Apply to an internship; one application per posting
    pub fn apply(
        &mut self,
        internship: &Internship,
        application_data: ApplicationData,
    ) -> Result<&ApplicationRecord, DomainError> {
        if self.application(internship.id()).is_some() {
            return Err(DomainError::conflict(format!(
                "Already applied to internship '{}'",
                internship.id()
            )));
        }

        let record = ApplicationRecord::new(
            internship.id().clone(),
            internship.company_name(),
            internship.position(),
            application_data,
            self.profile.snapshot(&self.email),
        );
        self.applied_internships.push(record);
        self.touch();

        Ok(&self.applied_internships[self.applied_internships.len() - 1])
    }

    /// Move an application to a new status and notify the intern
    pub fn update_application(
        &mut self,
        internship_id: &InternshipId,
        status: ApplicationStatus,
        interview_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Result<&ApplicationRecord, DomainError> {
        let index = self
            .applied_internships
            .iter()
            .position(|a| &a.internship_id == internship_id)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No application to internship '{}'",
                    internship_id
                ))
            })?;

        let current = self.applied_internships[index].status;
        if current.is_final() {
            return Err(DomainError::validation(format!(
                "Application is already {}",
                current
            )));
        }

        if status == ApplicationStatus::InterviewScheduled && interview_date.is_none() {
            return Err(DomainError::validation(
                "Interview date is required when scheduling an interview",
            ));
        }

        let now = Utc::now();
        let record = &mut self.applied_internships[index];
        record.status = status;
        if interview_date.is_some() {
            record.interview_date = interview_date;
        }
        if notes.is_some() {
            record.notes = notes;
        }
        record.responded_date = Some(now);

        let title = format!("Application {}", status);
        let message = format!(
            "Your application for {} at {} is now {}",
            record.position, record.company_name, status
        );
        self.notifications.push(Notification::new(
            NotificationKind::ApplicationUpdate,
            title,
            message,
            Some(internship_id.to_string()),
        ));
        self.touch();

        Ok(&self.applied_internships[index])
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Intern {
    type Key = InternId;
    const COLLECTION: &'static str = "interns";
    const UNIQUE_FIELDS: &'static [&'static [&'static str]] = &[&["username"], &["email"]];

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
