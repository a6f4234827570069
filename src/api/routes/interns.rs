//! Intern onboarding endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::intern::{
    Banner, DashboardStatus, Intern, InternProfile, ProfileState, VerificationStatus,
};
use crate::domain::organization::Affiliation;
use crate::infrastructure::intern::RegisterInternRequest;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInternBody {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub organization_name: Option<String>,
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewBody {
    /// Reviewing admin
    pub username: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InternCreatedResponse {
    pub message: &'static str,
    pub intern: Intern,
}

#[derive(Debug, Serialize)]
pub struct InternResponse {
    pub intern: Intern,
}

#[derive(Debug, Serialize)]
pub struct BannerView {
    pub kind: Banner,
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub username: String,
    pub verification_status: VerificationStatus,
    pub profile_state: ProfileState,
    pub affiliation: Affiliation,
    pub banners: Vec<BannerView>,
}

impl From<DashboardStatus> for DashboardResponse {
    fn from(status: DashboardStatus) -> Self {
        Self {
            username: status.username,
            verification_status: status.verification_status,
            profile_state: status.profile_state,
            affiliation: status.affiliation,
            banners: status
                .banners
                .into_iter()
                .map(|kind| BannerView {
                    kind,
                    title: kind.title(),
                    message: kind.message(),
                })
                .collect(),
        }
    }
}

/// POST /interns
pub async fn register_intern(
    State(state): State<AppState>,
    Json(body): Json<RegisterInternBody>,
) -> Result<(StatusCode, Json<InternCreatedResponse>), ApiError> {
    let intern = state
        .intern_service
        .register(RegisterInternRequest {
            username: body.username,
            email: body.email,
            full_name: body.full_name,
            organization_name: body.organization_name,
            organization_id: body.organization_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InternCreatedResponse {
            message: "Intern registered successfully",
            intern,
        }),
    ))
}

/// GET /interns/{username}
pub async fn get_intern(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<InternResponse>, ApiError> {
    let intern = state.intern_service.get_by_username(&username).await?;
    Ok(Json(InternResponse { intern }))
}

/// POST /interns/{username}/profile
pub async fn submit_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(profile): Json<InternProfile>,
) -> Result<Json<InternResponse>, ApiError> {
    debug!(username = %username, "Submitting intern profile");

    let intern = state
        .intern_service
        .submit_profile(&username, profile)
        .await?;
    Ok(Json(InternResponse { intern }))
}

/// POST /interns/{username}/verification
pub async fn review_intern(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<InternResponse>, ApiError> {
    let reviewer = body
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Username is required"))?;

    let status = body
        .status
        .ok_or_else(|| ApiError::bad_request("Status is required"))?
        .parse::<VerificationStatus>()
        .map_err(ApiError::bad_request)?;

    let intern = state
        .intern_service
        .review(&reviewer, &username, status)
        .await?;
    Ok(Json(InternResponse { intern }))
}

/// GET /interns/{username}/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let status = state.intern_service.dashboard(&username).await?;
    Ok(Json(DashboardResponse::from(status)))
}
