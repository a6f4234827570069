//! Supporting records kept on an intern: profile, reports, feedback,
//! notifications, demo tracking and preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::application::ProfileSnapshot;
use crate::domain::internship::deserialize_date;
use crate::domain::team::TeamId;

/// Self-reported profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub major: Option<String>,
    #[serde(deserialize_with = "deserialize_year")]
    pub graduation_year: Option<u16>,
    /// Free text, since scales differ between universities
    pub gpa: Option<String>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub internship_goals: Option<String>,
    pub previous_experience: Option<String>,
    pub portfolio_links: Vec<String>,
    pub resume_url: Option<String>,
}

impl InternProfile {
    /// Snapshot of the profile as it is attached to an application
    pub fn snapshot(&self, email: &str) -> ProfileSnapshot {
        ProfileSnapshot {
            full_name: self.full_name.clone(),
            email: email.to_string(),
            phone: self.phone.clone(),
            university: self.university.clone(),
            degree: self.degree.clone(),
            major: self.major.clone(),
            graduation_year: self.graduation_year,
            gpa: self.gpa.clone(),
            skills: self.skills.clone(),
            portfolio_links: self.portfolio_links.clone(),
            internship_goals: self.internship_goals.clone(),
            previous_experience: self.previous_experience.clone(),
            resume_url: self.resume_url.clone(),
        }
    }
}

/// Accepts a year as a number or a numeric string; blank means unset
pub(crate) fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u16),
        Text(String),
    }

    match Option::<Year>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Year::Number(year)) => Ok(Some(year)),
        Some(Year::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Year::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{}' is not a year", text))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Active,
    Completed,
    Inactive,
}

/// A project assignment on a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignment {
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    pub assigned_date: DateTime<Utc>,
    #[serde(default)]
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    Active,
    Submitted,
    Reviewed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub week_number: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub hours_worked: f32,
    #[serde(default)]
    pub tasks_completed: Vec<String>,
    #[serde(default)]
    pub challenges_faced: Option<String>,
    #[serde(default)]
    pub next_week_goals: Option<String>,
    #[serde(default)]
    pub mentor_feedback: Option<String>,
    #[serde(default)]
    pub submitted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ReportStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    MentorFeedback,
    PanelistEvaluation,
    AdminReview,
    SelfEvaluation,
    PeerReview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub from_user_id: String,
    pub from_user_name: String,
    pub from_user_role: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    /// 1 to 5
    pub rating: Option<u8>,
    pub comments: String,
    pub date_given: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to_week: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ApplicationUpdate,
    TeamAssignment,
    FeedbackReceived,
    DemoScheduled,
    ReportDue,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// Id of the record the notification is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        related_id: Option<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
            related_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    #[default]
    NotScheduled,
    Scheduled,
    Completed,
    Cancelled,
}

/// Final demo of the internship
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Demo {
    pub status: DemoStatus,
    pub date: Option<DateTime<Utc>>,
    pub materials: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub email_notifications: bool,
    pub application_updates: bool,
    pub team_updates: bool,
    pub report_reminders: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            email_notifications: true,
            application_updates: true,
            team_updates: true,
            report_reminders: true,
        }
    }
}
