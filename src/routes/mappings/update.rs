use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    domain::{Mapping, MappingAPIError, MappingUpdate, ValidationError},
    AppState,
};

/// Only the lead and manager fields are updatable; any other key in the
/// body is ignored by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMappingRequest {
    #[validate(length(
        max = 255,
        message = "teamLeadId must be at most 255 characters"
    ))]
    pub team_lead_id: Option<String>,
    #[validate(length(
        max = 255,
        message = "projectManagerId must be at most 255 characters"
    ))]
    pub project_manager_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMappingResponse {
    pub success: bool,
    pub message: String,
    pub data: Mapping,
}

#[tracing::instrument(name = "Update mapping route handler", skip_all)]
pub async fn update_mapping(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMappingRequest>,
) -> Result<Json<UpdateMappingResponse>, MappingAPIError> {
    request
        .validate()
        .map_err(|e| ValidationError::new(e.to_string()))?;

    let updates = MappingUpdate {
        team_lead_id: request.team_lead_id,
        project_manager_id: request.project_manager_id,
    };

    let updated = state
        .mapping_store
        .update(id, &updates)
        .await?
        .ok_or(MappingAPIError::NotFound)?;

    Ok(Json(UpdateMappingResponse {
        success: true,
        message: "Mapping updated successfully".to_owned(),
        data: updated,
    }))
}
