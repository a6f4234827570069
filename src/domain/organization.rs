//! Organization identity and affiliation
//!
//! Organizations are the tenant boundary: users, interns, teams and
//! internships are always read and written within one organization.

use serde::{Deserialize, Serialize};

/// Organization identifier as issued by the onboarding flow
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationId(String);

impl OrganizationId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();

        if trimmed.is_empty() {
            return Err("Organization ID cannot be empty".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrganizationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrganizationId> for String {
    fn from(id: OrganizationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An organization as seen from a member record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRef {
    pub organization_id: OrganizationId,
    pub organization_name: String,
}

impl OrganizationRef {
    pub fn new(organization_id: OrganizationId, organization_name: impl Into<String>) -> Self {
        Self {
            organization_id,
            organization_name: organization_name.into(),
        }
    }
}

/// Whether an intern currently belongs to an organization.
///
/// Interns onboarded before organization ids existed only carry a name, so
/// the id is optional for members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Affiliation {
    #[default]
    Unaffiliated,
    #[serde(rename_all = "camelCase")]
    Member {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        organization_id: Option<OrganizationId>,
        organization_name: String,
    },
}

impl Affiliation {
    pub fn member(organization_id: Option<OrganizationId>, name: impl Into<String>) -> Self {
        Self::Member {
            organization_id,
            organization_name: name.into(),
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member { .. })
    }

    pub fn organization_name(&self) -> Option<&str> {
        match self {
            Self::Member {
                organization_name, ..
            } => Some(organization_name),
            Self::Unaffiliated => None,
        }
    }

    pub fn organization_id(&self) -> Option<&OrganizationId> {
        match self {
            Self::Member {
                organization_id, ..
            } => organization_id.as_ref(),
            Self::Unaffiliated => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_id_trims() {
        let id = OrganizationId::new("  org-1 ").unwrap();
        assert_eq!(id.as_str(), "org-1");
    }

    #[test]
    fn test_organization_id_empty() {
        assert!(OrganizationId::new("   ").is_err());
    }

    #[test]
    fn test_affiliation_default_is_unaffiliated() {
        let affiliation = Affiliation::default();
        assert!(!affiliation.is_member());
        assert!(affiliation.organization_name().is_none());
    }

    #[test]
    fn test_affiliation_serialization() {
        let affiliation =
            Affiliation::member(Some(OrganizationId::new("org-1").unwrap()), "Acme");
        let json = serde_json::to_value(&affiliation).unwrap();

        assert_eq!(json["state"], "member");
        assert_eq!(json["organizationId"], "org-1");
        assert_eq!(json["organizationName"], "Acme");

        let unaffiliated = serde_json::to_value(Affiliation::Unaffiliated).unwrap();
        assert_eq!(unaffiliated["state"], "unaffiliated");
    }

    #[test]
    fn test_affiliation_member_without_id() {
        let json = r#"{"state":"member","organizationName":"Acme"}"#;
        let affiliation: Affiliation = serde_json::from_str(json).unwrap();

        assert_eq!(affiliation.organization_name(), Some("Acme"));
        assert!(affiliation.organization_id().is_none());
    }
}
