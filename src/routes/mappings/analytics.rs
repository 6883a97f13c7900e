use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    domain::{
        LeadPerformance, ManagerOverview, MappingAPIError,
        ProjectDistribution,
    },
    AppState,
};

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
}

#[tracing::instrument(name = "Project distribution route handler", skip_all)]
pub async fn get_project_distribution(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse<ProjectDistribution>>, MappingAPIError> {
    let distribution = state.mapping_store.project_distribution().await?;

    Ok(Json(AnalyticsResponse {
        success: true,
        data: distribution,
    }))
}

#[tracing::instrument(name = "Lead performance route handler", skip_all)]
pub async fn get_lead_performance(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse<LeadPerformance>>, MappingAPIError> {
    let leads = state.mapping_store.lead_performance().await?;

    Ok(Json(AnalyticsResponse {
        success: true,
        data: leads,
    }))
}

#[tracing::instrument(name = "Manager overview route handler", skip_all)]
pub async fn get_manager_overview(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse<ManagerOverview>>, MappingAPIError> {
    let managers = state.mapping_store.manager_overview().await?;

    Ok(Json(AnalyticsResponse {
        success: true,
        data: managers,
    }))
}
