//! Internship applications embedded in an intern record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::records::deserialize_year;
use crate::domain::internship::{InternshipId, deserialize_date};

/// Where an application stands in the hiring flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Shortlisted,
    InterviewScheduled,
    Selected,
    /// The intern accepted an offer
    Accepted,
    /// The intern declined an offer
    Declined,
    Rejected,
}

impl ApplicationStatus {
    /// No further status changes once an application reaches one of these
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined | Self::Rejected)
    }

    /// Statuses set by the intern rather than the organization
    pub fn is_intern_response(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "shortlisted" => Ok(Self::Shortlisted),
            "interview_scheduled" => Ok(Self::InterviewScheduled),
            "selected" => Ok(Self::Selected),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("Unknown application status '{}'", other)),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Shortlisted => "shortlisted",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Selected => "selected",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// What the intern wrote when applying
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationData {
    pub cover_letter: Option<String>,
    pub why_interested_reason: Option<String>,
    pub relevant_experience: Option<String>,
    pub expected_outcome: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub available_start_date: Option<DateTime<Utc>>,
    pub additional_comments: Option<String>,
}

/// Copy of the intern's profile taken at application time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSnapshot {
    pub full_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub major: Option<String>,
    #[serde(deserialize_with = "deserialize_year")]
    pub graduation_year: Option<u16>,
    pub gpa: Option<String>,
    pub skills: Vec<String>,
    pub portfolio_links: Vec<String>,
    pub internship_goals: Option<String>,
    pub previous_experience: Option<String>,
    pub resume_url: Option<String>,
}

/// One application to an internship posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub internship_id: InternshipId,
    pub company_name: String,
    pub position: String,
    pub applied_date: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub application_data: ApplicationData,
    #[serde(default)]
    pub user_profile_snapshot: ProfileSnapshot,
}

impl ApplicationRecord {
    pub fn new(
        internship_id: InternshipId,
        company_name: impl Into<String>,
        position: impl Into<String>,
        application_data: ApplicationData,
        user_profile_snapshot: ProfileSnapshot,
    ) -> Self {
        Self {
            internship_id,
            company_name: company_name.into(),
            position: position.into(),
            applied_date: Utc::now(),
            status: ApplicationStatus::Pending,
            interview_date: None,
            notes: None,
            responded_date: None,
            application_data,
            user_profile_snapshot,
        }
    }
}
