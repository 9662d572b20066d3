use axum::extract::Path;
use axum::Json;

use crate::api::ApiError;
use crate::assignment::{squad_composition_for, SquadComposition};

pub async fn get_composition(
    Path(mode): Path<String>,
) -> Result<Json<SquadComposition>, ApiError> {
    squad_composition_for(&mode)
        .map(Json)
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
