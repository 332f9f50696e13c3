use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::api::errors::ApiError;
use crate::application::dto::{PageQuery, TeamRequest, TeamResponse};
use crate::application::TeamService;
use crate::domain::pagination::Page;

/// Create a new team with its roster
///
/// POST /api/teams
pub async fn create_team(
    State(service): State<TeamService>,
    payload: Result<Json<TeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let draft = request.validate()?;

    let team = service.create_team(draft).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Replace a team and its entire roster
///
/// PUT /api/teams/:id
pub async fn update_team(
    State(service): State<TeamService>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let draft = request.validate()?;

    let team = service.update_team(id, draft).await?;

    Ok(Json(team))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(service): State<TeamService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let team = service.get_team_by_id(id).await?;
    Ok(Json(team))
}

/// List teams one page at a time
///
/// GET /api/teams?page=0&size=20
pub async fn list_teams(
    State(service): State<TeamService>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<TeamResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let page = query.validate()?;

    let teams = service.list_teams(page).await?;

    Ok(Json(teams))
}

/// Delete a team and its players
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(service): State<TeamService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    service.delete_team(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
