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
pub struct ProjectMembersResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Mapping>,
}

#[tracing::instrument(name = "Project members route handler", skip_all)]
pub async fn get_members_by_project(
    State(state): State<AppState>,
    Path(project_name): Path<String>,
) -> Result<Json<ProjectMembersResponse>, MappingAPIError> {
    let members = state
        .mapping_store
        .members_by_project(&project_name)
        .await?;

    Ok(Json(ProjectMembersResponse {
        success: true,
        count: members.len(),
        data: members,
    }))
}
