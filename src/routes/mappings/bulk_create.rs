use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::create::{validate_mapping_request, CreateMappingRequest};
use crate::{
    domain::{
        Mapping, MappingAPIError, NewMapping, ValidationError,
        MAX_BULK_BATCH_SIZE,
    },
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub mappings: Vec<CreateMappingRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub success: bool,
    pub message: String,
    pub created: usize,
    pub total: usize,
    pub data: Vec<Mapping>,
}

#[tracing::instrument(name = "Bulk create mappings route handler", skip_all)]
pub async fn bulk_create_mappings(
    State(state): State<AppState>,
    Json(request): Json<BulkCreateRequest>,
) -> Result<(StatusCode, Json<BulkCreateResponse>), MappingAPIError> {
    if request.mappings.is_empty() {
        return Err(ValidationError::new(
            "mappings must be a non-empty array".to_owned(),
        )
        .into());
    }

    if request.mappings.len() > MAX_BULK_BATCH_SIZE {
        return Err(ValidationError::new(
            "Cannot create more than 100 mappings at once".to_owned(),
        )
        .into());
    }

    for mapping in &request.mappings {
        validate_mapping_request(mapping)?;
    }

    let total = request.mappings.len();
    let batch: Vec<NewMapping> = request
        .mappings
        .into_iter()
        .map(CreateMappingRequest::into_new_mapping)
        .collect();

    let created = state.mapping_store.bulk_create(&batch).await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResponse {
            success: true,
            message: format!(
                "Successfully created {} of {} mappings",
                created.len(),
                total
            ),
            created: created.len(),
            total,
            data: created,
        }),
    ))
}
