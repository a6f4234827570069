//! Internship posting entity

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::organization::{OrganizationId, OrganizationRef};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Internship identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InternshipId(String);

impl InternshipId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() {
            return Err(DomainError::invalid_id("Internship ID cannot be empty"));
        }

        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::invalid_id(format!(
                "Internship ID '{}' can only contain alphanumeric characters and hyphens",
                id
            )));
        }

        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InternshipId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).map_err(|e| e.message().to_string())
    }
}

impl From<InternshipId> for String {
    fn from(id: InternshipId) -> Self {
        id.0
    }
}

impl std::fmt::Display for InternshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for InternshipId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkMode {
    Onsite,
    Remote,
    Hybrid,
}

/// Fields of a posting supplied by the poster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<WorkMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openings: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub start_date: Option<DateTime<Utc>>,
    /// Last day applications are accepted
    #[serde(default, deserialize_with = "deserialize_date")]
    pub application_deadline: Option<DateTime<Utc>>,
}

impl PostingDetails {
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("title", &self.title),
            ("companyName", &self.company_name),
            ("position", &self.position),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{} is required", field)));
            }
        }

        if self.openings == Some(0) {
            return Err(DomainError::validation("openings must be at least 1"));
        }

        Ok(())
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC midnight)
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some).map_err(serde::de::Error::custom),
    }
}

pub(crate) fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("'{}' is not an RFC 3339 timestamp or YYYY-MM-DD date", s))
}

/// Start of the UTC day containing `at`
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Internship posting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    id: InternshipId,
    /// Username of the poster
    posted_by: String,
    #[serde(flatten)]
    organization: OrganizationRef,
    #[serde(flatten)]
    details: PostingDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Internship {
    pub fn new(
        id: InternshipId,
        posted_by: impl Into<String>,
        organization: OrganizationRef,
        details: PostingDetails,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            posted_by: posted_by.into(),
            organization,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    pub fn id(&self) -> &InternshipId {
        &self.id
    }

    pub fn posted_by(&self) -> &str {
        &self.posted_by
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization.organization_id
    }

    pub fn organization_name(&self) -> &str {
        &self.organization.organization_name
    }

    pub fn details(&self) -> &PostingDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn company_name(&self) -> &str {
        &self.details.company_name
    }

    pub fn position(&self) -> &str {
        &self.details.position
    }

    pub fn application_deadline(&self) -> Option<DateTime<Utc>> {
        self.details.application_deadline
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the deadline passed before the UTC day containing `at`. The
    /// deadline day itself is still open, as is a posting with no deadline.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.details
            .application_deadline
            .is_some_and(|deadline| deadline < start_of_day(at))
    }
}

impl StorageEntity for Internship {
    type Key = InternshipId;
    const COLLECTION: &'static str = "internships";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Filter for listing internships
#[derive(Debug, Clone, Default)]
pub struct InternshipQuery {
    pub organization_id: Option<OrganizationId>,
    /// Drop postings whose deadline is before this instant, or that have none
    pub deadline_cutoff: Option<DateTime<Utc>>,
}

impl InternshipQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Hide postings that expired before the UTC day containing `now`
    pub fn hide_expired_at(mut self, now: DateTime<Utc>) -> Self {
        self.deadline_cutoff = Some(start_of_day(now));
        self
    }

    pub fn matches(&self, internship: &Internship) -> bool {
        if let Some(org) = &self.organization_id {
            if internship.organization_id() != org {
                return false;
            }
        }

        match self.deadline_cutoff {
            Some(cutoff) => internship
                .application_deadline()
                .is_some_and(|deadline| deadline >= cutoff),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn acme() -> OrganizationRef {
        OrganizationRef::new(OrganizationId::new("org-1").unwrap(), "Acme")
    }

    fn posting(deadline: Option<DateTime<Utc>>) -> Internship {
        Internship::new(
            InternshipId::generate(),
            "admin",
            acme(),
            PostingDetails {
                title: "Backend".to_string(),
                company_name: "Acme".to_string(),
                position: "Backend Intern".to_string(),
                application_deadline: deadline,
                ..Default::default()
            },
        )
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2026-03-01").unwrap(), utc(2026, 3, 1, 0));
        assert_eq!(
            parse_date("2026-03-01T10:00:00Z").unwrap(),
            utc(2026, 3, 1, 10)
        );
        assert_eq!(
            parse_date("2026-03-01T12:00:00+02:00").unwrap(),
            utc(2026, 3, 1, 10)
        );
        assert!(parse_date("March 1st").is_err());
    }

    #[test]
    fn test_details_deserialization() {
        let json = r#"{
            "title": "Backend",
            "companyName": "Acme",
            "position": "Intern",
            "applicationDeadline": "2026-05-01",
            "workMode": "remote",
            "skills": ["rust"],
            "unknownField": true
        }"#;

        let details: PostingDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.application_deadline, Some(utc(2026, 5, 1, 0)));
        assert_eq!(details.work_mode, Some(WorkMode::Remote));
        assert!(details.start_date.is_none());
    }

    #[test]
    fn test_null_deadline() {
        let details: PostingDetails =
            serde_json::from_str(r#"{"title":"x","applicationDeadline":null}"#).unwrap();
        assert!(details.application_deadline.is_none());
    }

    #[test]
    fn test_details_validation() {
        let mut details = posting(None).details().clone();
        assert!(details.validate().is_ok());

        details.position = " ".to_string();
        let err = details.validate().unwrap_err();
        assert_eq!(err.message(), "position is required");
    }

    #[test]
    fn test_deadline_today_is_not_expired() {
        let now = utc(2026, 3, 10, 15);

        assert!(!posting(Some(utc(2026, 3, 10, 0))).is_expired_at(now));
        assert!(!posting(Some(utc(2026, 4, 1, 0))).is_expired_at(now));
        assert!(posting(Some(utc(2026, 3, 9, 23))).is_expired_at(now));
        assert!(!posting(None).is_expired_at(now));
    }

    #[test]
    fn test_query_matching() {
        let now = utc(2026, 3, 10, 15);
        let open = posting(Some(utc(2026, 3, 10, 0)));
        let expired = posting(Some(utc(2026, 3, 1, 0)));
        let undated = posting(None);

        let all = InternshipQuery::new();
        assert!(all.matches(&open) && all.matches(&expired) && all.matches(&undated));

        let current = InternshipQuery::new().hide_expired_at(now);
        assert!(current.matches(&open));
        assert!(!current.matches(&expired));
        assert!(!current.matches(&undated));

        let other_org =
            InternshipQuery::new().with_organization(OrganizationId::new("org-2").unwrap());
        assert!(!other_org.matches(&open));
    }

    #[test]
    fn test_internship_serialization_shape() {
        let internship = posting(Some(utc(2026, 3, 10, 0)));
        let json = serde_json::to_value(&internship).unwrap();

        assert_eq!(json["postedBy"], "admin");
        assert_eq!(json["organizationId"], "org-1");
        assert_eq!(json["organizationName"], "Acme");
        assert_eq!(json["companyName"], "Acme");
        assert!(json["applicationDeadline"].is_string());

        let back: Internship = serde_json::from_value(json).unwrap();
        assert_eq!(back.application_deadline(), internship.application_deadline());
    }
}
