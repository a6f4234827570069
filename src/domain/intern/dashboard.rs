//! Dashboard status of an intern
//!
//! The dashboard shows at most one onboarding banner, derived from the
//! intern's affiliation and profile state.

use serde::Serialize;

use super::entity::{Intern, ProfileState, VerificationStatus};
use crate::domain::organization::Affiliation;

/// Onboarding banner shown on the intern dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Banner {
    ProfileVerificationRequired,
    ProfileVerificationInProgress,
    ApplyToOrganization,
}

impl Banner {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ProfileVerificationRequired => "Profile Verification Required",
            Self::ProfileVerificationInProgress => "Profile Verification In Progress",
            Self::ApplyToOrganization => "You are not currently part of any organization",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ProfileVerificationRequired => {
                "Submit your profile details for verification. Once an administrator approves \
                 them you can join an organization."
            }
            Self::ProfileVerificationInProgress => {
                "Your profile has been submitted for verification. An administrator will review \
                 it shortly."
            }
            Self::ApplyToOrganization => {
                "Your profile is verified. You can now apply to join an organization."
            }
        }
    }
}

/// What the dashboard needs to render the onboarding area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatus {
    pub username: String,
    pub verification_status: VerificationStatus,
    pub profile_state: ProfileState,
    pub affiliation: Affiliation,
    pub banners: Vec<Banner>,
}

impl DashboardStatus {
    pub fn for_intern(intern: &Intern) -> Self {
        let banner = match (intern.affiliation(), intern.profile_state()) {
            (_, ProfileState::AwaitingOrganization) => Some(Banner::ApplyToOrganization),
            (Affiliation::Unaffiliated, ProfileState::NotSubmitted) => {
                Some(Banner::ProfileVerificationRequired)
            }
            (Affiliation::Unaffiliated, ProfileState::Submitted { .. }) => {
                Some(Banner::ProfileVerificationInProgress)
            }
            (Affiliation::Member { .. }, _) => None,
        };

        Self {
            username: intern.username().to_string(),
            verification_status: intern.verification_status(),
            profile_state: intern.profile_state(),
            affiliation: intern.affiliation().clone(),
            banners: banner.into_iter().collect(),
        }
    }
}
