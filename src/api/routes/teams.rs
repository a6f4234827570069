//! Team endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::Team;
use crate::infrastructure::team::{CreateTeamRequest, EditTeamRequest};

/// Body of `POST /team`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamBody {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub mentors: Option<Vec<String>>,
    pub interns: Option<Vec<String>>,
    pub panelists: Option<Vec<String>>,
    pub description: Option<String>,
}

/// Body of `POST /team/edit`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTeamBody {
    pub username: Option<String>,
    pub edit_team_name: Option<String>,
    pub edit_mentors: Option<Vec<String>>,
    pub edit_interns: Option<Vec<String>>,
    pub edit_panelists: Option<Vec<String>>,
    pub edit_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTeamsQuery {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TeamCreatedResponse {
    pub message: &'static str,
    pub team: Team,
}

#[derive(Debug, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<Team>,
}

fn required_text(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

fn required_list(value: Option<Vec<String>>, message: &str) -> Result<Vec<String>, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(message))
}

/// POST /team
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<CreateTeamBody>,
) -> Result<(StatusCode, Json<TeamCreatedResponse>), ApiError> {
    let request = CreateTeamRequest {
        requester: required_text(body.username, "Username is required")?,
        team_name: required_text(body.team_name, "Team name is required")?,
        mentors: required_list(body.mentors, "Mentors are required")?,
        interns: required_list(body.interns, "Interns are required")?,
        panelists: required_list(body.panelists, "Panelists are required")?,
        description: required_text(body.description, "Description is required")?,
    };

    debug!(requester = %request.requester, team = %request.team_name, "Creating team");

    let team = state.team_service.create_team(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamCreatedResponse {
            message: "Team created successfully",
            team,
        }),
    ))
}

/// POST /team/edit
pub async fn edit_team(
    State(state): State<AppState>,
    Json(body): Json<EditTeamBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = EditTeamRequest {
        requester: required_text(body.username, "Username is required")?,
        team_name: required_text(body.edit_team_name, "Team name is required")?,
        mentors: required_list(body.edit_mentors, "Mentors are required")?,
        interns: required_list(body.edit_interns, "Interns are required")?,
        panelists: required_list(body.edit_panelists, "Panelists are required")?,
        description: required_text(body.edit_description, "Description is required")?,
    };

    debug!(requester = %request.requester, team = %request.team_name, "Editing team");

    state.team_service.edit_team(request).await?;

    Ok(Json(MessageResponse {
        message: "Team updated successfully",
    }))
}

/// GET /teams?username=
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let username = required_text(query.username, "Username is required")?;
    let teams = state.team_service.list_teams(&username).await?;

    Ok(Json(ListTeamsResponse { teams }))
}
