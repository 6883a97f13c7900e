use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ListOptions, Mapping, MappingAPIError, MappingFilter, Pagination,
        SortColumn, SortOrder, ValidationError, DEFAULT_PAGE_LIMIT,
        MAX_PAGE_LIMIT,
    },
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMappingsQueryParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub project_name: Option<String>,
    pub team_lead_id: Option<String>,
    pub team_member_id: Option<String>,
    pub project_manager_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMappingsResponse {
    pub success: bool,
    pub data: Vec<Mapping>,
    pub pagination: Pagination,
}

#[tracing::instrument(name = "List mappings route handler", skip_all)]
pub async fn list_mappings(
    State(state): State<AppState>,
    Query(params): Query<ListMappingsQueryParams>,
) -> Result<Json<ListMappingsResponse>, MappingAPIError> {
    let options = parse_list_options(params)?;

    let page = state.mapping_store.list(&options).await?;

    Ok(Json(ListMappingsResponse {
        success: true,
        data: page.data,
        pagination: page.pagination,
    }))
}

fn parse_list_options(
    params: ListMappingsQueryParams,
) -> Result<ListOptions, ValidationError> {
    let page = params.page.unwrap_or(1);
    if page < 1 {
        return Err(ValidationError::new(
            "Page must be greater than 0".to_owned(),
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ValidationError::new(
            "Limit must be between 1 and 100".to_owned(),
        ));
    }

    Ok(ListOptions {
        page,
        limit,
        sort_by: params
            .sort_by
            .as_deref()
            .map(SortColumn::from_param)
            .unwrap_or_default(),
        sort_order: params
            .sort_order
            .as_deref()
            .map(SortOrder::from_param)
            .unwrap_or_default(),
        filter: MappingFilter {
            project_name: params.project_name.filter(|v| !v.is_empty()),
            team_lead_id: params.team_lead_id.filter(|v| !v.is_empty()),
            team_member_id: params.team_member_id.filter(|v| !v.is_empty()),
            project_manager_id: params
                .project_manager_id
                .filter(|v| !v.is_empty()),
            search: params.search.filter(|v| !v.is_empty()),
        },
    })
}
