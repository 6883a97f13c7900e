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
pub struct MemberProjectsResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Mapping>,
}

#[tracing::instrument(name = "Member projects route handler", skip_all)]
pub async fn get_projects_by_member(
    State(state): State<AppState>,
    Path(team_member_id): Path<String>,
) -> Result<Json<MemberProjectsResponse>, MappingAPIError> {
    let projects = state
        .mapping_store
        .projects_by_member(&team_member_id)
        .await?;

    Ok(Json(MemberProjectsResponse {
        success: true,
        count: projects.len(),
        data: projects,
    }))
}
