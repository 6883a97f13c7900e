use axum::{extract::State, http::header, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Mapping, MappingAPIError},
    AppState,
};

const CSV_HEADER: &str =
    "ID,Team Member ID,Team Lead ID,Project Name,Project Manager ID,Created At";

#[tracing::instrument(name = "CSV export route handler", skip_all)]
pub async fn export_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MappingAPIError> {
    let mappings = state.mapping_store.list_all().await?;
    let csv = render_csv(&mappings);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=mappings.csv",
            ),
        ],
        csv,
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonExportResponse {
    pub success: bool,
    pub count: usize,
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    pub data: Vec<Mapping>,
}

#[tracing::instrument(name = "JSON export route handler", skip_all)]
pub async fn export_json(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MappingAPIError> {
    let mappings = state.mapping_store.list_all().await?;

    let body = JsonExportResponse {
        success: true,
        count: mappings.len(),
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        data: mappings,
    };

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=mappings.json",
        )],
        Json(body),
    ))
}

fn render_csv(mappings: &[Mapping]) -> String {
    let mut lines = Vec::with_capacity(mappings.len() + 1);
    lines.push(CSV_HEADER.to_owned());

    for mapping in mappings {
        let fields = [
            mapping.id.to_string(),
            mapping.team_member_id.clone(),
            mapping.team_lead_id.clone(),
            mapping.project_name.clone(),
            mapping.project_manager_id.clone(),
            mapping
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ];
        let row = fields
            .iter()
            .map(|field| csv_quote(field))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    lines.join("\n")
}

// Every data field is double-quoted; embedded quotes are doubled so the
// output survives a round-trip through a standard CSV parser.
fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
