use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::assignment::{
    auto_assign_teams, balance_teams_by_tier, validate_team_composition, ValidationReport,
};
use crate::models::{Player, TeamAssignment};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Deserialize)]
pub struct AssignPlayersRequest {
    pub players: Vec<Player>,
    #[serde(default)]
    pub balance: bool,
}

#[derive(Debug, Serialize)]
pub struct AssignPlayersResponse {
    pub teams: Vec<TeamAssignment>,
}

pub async fn assign_players(
    payload: Result<Json<AssignPlayersRequest>, JsonRejection>,
) -> Result<Json<AssignPlayersResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut teams = auto_assign_teams(&request.players);
    if request.balance {
        teams = balance_teams_by_tier(teams);
    }

    Ok(Json(AssignPlayersResponse { teams }))
}

pub async fn validate_team(
    payload: Result<Json<TeamAssignment>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(team) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(validate_team_composition(&team)))
}
