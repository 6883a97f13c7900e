use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{MappingAPIError, MappingStatistics},
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub success: bool,
    pub data: MappingStatistics,
}

#[tracing::instrument(name = "Statistics route handler", skip_all)]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, MappingAPIError> {
    let stats = state.mapping_store.statistics().await?;

    Ok(Json(StatisticsResponse {
        success: true,
        data: stats,
    }))
}
