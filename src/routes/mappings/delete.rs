use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Mapping, MappingAPIError},
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteMappingResponse {
    pub success: bool,
    pub message: String,
    pub data: Mapping,
}

#[tracing::instrument(name = "Delete mapping route handler", skip_all)]
pub async fn delete_mapping(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteMappingResponse>, MappingAPIError> {
    let deleted = state
        .mapping_store
        .delete(id)
        .await?
        .ok_or(MappingAPIError::NotFound)?;

    Ok(Json(DeleteMappingResponse {
        success: true,
        message: "Mapping deleted successfully".to_owned(),
        data: deleted,
    }))
}
