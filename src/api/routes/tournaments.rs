use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::roster::{
    run_assignment, stored_assignments, tournament_statistics, AssignmentRequest,
    AssignmentSummary, DraftStatistics, RosterError, TournamentAssignments,
};

/// Run blocking storage work off the async executor.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, RosterError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("Storage task failed: {}", e)))?;
    Ok(result?)
}

pub async fn assign_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Result<Json<AssignmentSummary>, ApiError> {
    let Json(request) = payload.map_err(|_| {
        ApiError::BadRequest("Invalid assignment type or missing data".to_string())
    })?;

    let _guard = state.assignments_lock.write().await;
    let directory = state.directory.clone();
    let sink = state.sink.clone();
    let balance_by_tier = state.balance_by_tier;
    let summary = blocking(move || {
        run_assignment(
            directory.as_ref(),
            sink.as_ref(),
            &tournament_id,
            &request,
            balance_by_tier,
        )
    })
    .await?;

    Ok(Json(summary))
}

pub async fn list_assignments(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<TournamentAssignments>, ApiError> {
    let _guard = state.assignments_lock.read().await;
    let sink = state.sink.clone();
    let assignments = blocking(move || stored_assignments(sink.as_ref(), &tournament_id)).await?;
    Ok(Json(assignments))
}

pub async fn draft_statistics(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<DraftStatistics>, ApiError> {
    let directory = state.directory.clone();
    let statistics =
        blocking(move || tournament_statistics(directory.as_ref(), &tournament_id)).await?;
    Ok(Json(statistics))
}
