//! Internship endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::intern::{ApplicationData, ApplicationRecord, ApplicationStatus};
use crate::domain::internship::{Internship, PostingDetails};
use crate::infrastructure::internship::{PostInternshipRequest, Poster, UpdateApplicationRequest};

const CREATE_FAILED: &str = "Failed to create internship posting";
const LIST_FAILED: &str = "Failed to fetch internships";

/// Identity of the poster as sent by the client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub organization_id: String,
}

/// Body of `POST /internships`: poster identity plus the posting fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInternshipBody {
    pub user_data: Option<UserData>,
    #[serde(flatten)]
    pub details: PostingDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInternshipsQuery {
    pub organization_id: Option<String>,
    pub hide_expired: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyBody {
    pub username: Option<String>,
    #[serde(default)]
    pub application_data: ApplicationData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationBody {
    pub username: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub interview_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InternshipCreatedResponse {
    pub message: &'static str,
    pub internship: Internship,
}

#[derive(Debug, Serialize)]
pub struct ListInternshipsResponse {
    pub internships: Vec<Internship>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub message: &'static str,
    pub application: ApplicationRecord,
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => crate::domain::internship::parse_date(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// POST /internships
pub async fn create_internship(
    State(state): State<AppState>,
    Json(body): Json<PostInternshipBody>,
) -> Result<(StatusCode, Json<InternshipCreatedResponse>), ApiError> {
    let user_data = body
        .user_data
        .ok_or_else(|| ApiError::bad_request("userData is required"))?;

    debug!(poster = %user_data.username, title = %body.details.title, "Posting internship");

    let request = PostInternshipRequest {
        poster: Poster {
            username: user_data.username,
            organization_name: user_data.organization_name,
            organization_id: user_data.organization_id,
        },
        details: body.details,
    };

    let internship = state
        .internship_service
        .post(request)
        .await
        .map_err(|e| ApiError::with_summary(e, CREATE_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(InternshipCreatedResponse {
            message: "Internship posted successfully",
            internship,
        }),
    ))
}

/// GET /internships?organizationId=&hideExpired=
pub async fn list_internships(
    State(state): State<AppState>,
    Query(query): Query<ListInternshipsQuery>,
) -> Result<Json<ListInternshipsResponse>, ApiError> {
    // Only the exact string "true" enables the filter
    let hide_expired = query.hide_expired.as_deref() == Some("true");

    let internships = state
        .internship_service
        .list(query.organization_id.as_deref(), hide_expired)
        .await
        .map_err(|e| ApiError::with_summary(e, LIST_FAILED))?;

    Ok(Json(ListInternshipsResponse { internships }))
}

/// POST /internships/{internship_id}/apply
pub async fn apply(
    State(state): State<AppState>,
    Path(internship_id): Path<String>,
    Json(body): Json<ApplyBody>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let username = body
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Username is required"))?;

    let application = state
        .internship_service
        .apply(&internship_id, &username, body.application_data)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            message: "Application submitted successfully",
            application,
        }),
    ))
}

/// PUT /internships/{internship_id}/applications/{intern_username}
pub async fn update_application(
    State(state): State<AppState>,
    Path((internship_id, intern_username)): Path<(String, String)>,
    Json(body): Json<UpdateApplicationBody>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let reviewer = body
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Username is required"))?;

    let status = body
        .status
        .ok_or_else(|| ApiError::bad_request("Status is required"))?
        .parse::<ApplicationStatus>()
        .map_err(ApiError::bad_request)?;

    let request = UpdateApplicationRequest {
        reviewer,
        status,
        interview_date: body.interview_date,
        notes: body.notes,
    };

    let application = state
        .internship_service
        .update_application(&internship_id, &intern_username, request)
        .await?;

    Ok(Json(ApplicationResponse {
        message: "Application updated successfully",
        application,
    }))
}
