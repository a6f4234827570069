//! Resource endpoints

pub mod interns;
pub mod internships;
pub mod teams;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::state::AppState;

/// Create the resource router
pub fn create_routes_router() -> Router<AppState> {
    Router::new()
        // Teams
        .route("/team", post(teams::create_team))
        .route("/team/edit", post(teams::edit_team))
        .route("/teams", get(teams::list_teams))
        // Internships and applications
        .route(
            "/internships",
            get(internships::list_internships).post(internships::create_internship),
        )
        .route("/internships/{internship_id}/apply", post(internships::apply))
        .route(
            "/internships/{internship_id}/applications/{intern_username}",
            put(internships::update_application),
        )
        // Staff onboarding
        .route("/users", post(users::create_user))
        .route("/users/{username}", get(users::get_user))
        // Intern onboarding
        .route("/interns", post(interns::register_intern))
        .route("/interns/{username}", get(interns::get_intern))
        .route("/interns/{username}/profile", post(interns::submit_profile))
        .route("/interns/{username}/verification", post(interns::review_intern))
        .route("/interns/{username}/dashboard", get(interns::dashboard))
}
