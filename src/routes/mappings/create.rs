use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    domain::{
        Mapping, MappingAPIError, MappingStoreError, NewMapping,
        ValidationError,
    },
    AppState,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMappingRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "teamMemberId must be between 1 and 255 characters"
    ))]
    pub team_member_id: String,
    #[serde(default)]
    #[validate(length(
        max = 255,
        message = "teamLeadId must be at most 255 characters"
    ))]
    pub team_lead_id: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "projectName must be between 1 and 255 characters"
    ))]
    pub project_name: String,
    #[serde(default)]
    #[validate(length(
        max = 255,
        message = "projectManagerId must be at most 255 characters"
    ))]
    pub project_manager_id: String,
}

impl CreateMappingRequest {
    pub fn into_new_mapping(self) -> NewMapping {
        NewMapping {
            team_member_id: self.team_member_id,
            team_lead_id: self.team_lead_id,
            project_name: self.project_name,
            project_manager_id: self.project_manager_id,
        }
    }
}

/// Shared between single and bulk create: required fields must survive
/// trimming, and every field is capped at 255 characters.
pub(super) fn validate_mapping_request(
    request: &CreateMappingRequest,
) -> Result<(), ValidationError> {
    if request.team_member_id.trim().is_empty() {
        return Err(ValidationError::new(
            "teamMemberId is required".to_owned(),
        ));
    }

    if request.project_name.trim().is_empty() {
        return Err(ValidationError::new(
            "projectName is required and cannot be empty".to_owned(),
        ));
    }

    request
        .validate()
        .map_err(|e| ValidationError::new(e.to_string()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMappingResponse {
    pub success: bool,
    pub message: String,
    pub data: Mapping,
}

#[tracing::instrument(name = "Create mapping route handler", skip_all)]
pub async fn create_mapping(
    State(state): State<AppState>,
    Json(request): Json<CreateMappingRequest>,
) -> Result<(StatusCode, Json<CreateMappingResponse>), MappingAPIError> {
    validate_mapping_request(&request)?;

    let new_mapping = request.into_new_mapping();

    // Friendly rejection path; the unique constraint still backstops races.
    if state
        .mapping_store
        .exists(&new_mapping.team_member_id, &new_mapping.project_name)
        .await?
    {
        return Err(MappingAPIError::DuplicateMapping);
    }

    let mapping = state
        .mapping_store
        .create(&new_mapping)
        .await
        .map_err(|e| match e {
            MappingStoreError::DuplicateEntry => {
                MappingAPIError::DuplicateMapping
            }
            e => e.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateMappingResponse {
            success: true,
            message: "Mapping created successfully".to_owned(),
            data: mapping,
        }),
    ))
}
