use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Mapping, MappingAPIError},
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Mapping>,
}

/// Unfiltered listing, newest first.
#[tracing::instrument(name = "Simple list route handler", skip_all)]
pub async fn list_mappings_simple(
    State(state): State<AppState>,
) -> Result<Json<SimpleListResponse>, MappingAPIError> {
    let mappings = state.mapping_store.list_all().await?;

    Ok(Json(SimpleListResponse {
        success: true,
        count: mappings.len(),
        data: mappings,
    }))
}
