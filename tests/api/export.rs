use serde_json::json;
use test_context::test_context;

use crate::helpers::{create_mapping, get_json_response_body, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn csv_export_quotes_every_field(app: &mut TestApp) {
    let created =
        create_mapping(app, "alice", "lead, \"the boss\"", "Broadcast", "pm-1")
            .await;
    let id = created["id"].as_i64().unwrap();

    let response = app.get_path("/mappings/export/csv").await;
    assert_eq!(response.status().as_u16(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/csv"));

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert_eq!(disposition, "attachment; filename=mappings.csv");

    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some(
            "ID,Team Member ID,Team Lead ID,Project Name,\
             Project Manager ID,Created At"
        )
    );

    let row = lines.next().expect("exported CSV has no data row");
    assert!(row.starts_with(&format!("\"{id}\",\"alice\",")));
    // The comma stays inside the quoted field and the embedded quotes
    // come back doubled.
    assert!(row.contains("\"lead, \"\"the boss\"\"\""));
    assert!(row.contains("\"Broadcast\""));
    assert_eq!(lines.next(), None);
}

#[test_context(TestApp)]
#[tokio::test]
async fn csv_export_of_an_empty_table_is_just_the_header(app: &mut TestApp) {
    let response = app.get_path("/mappings/export/csv").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert_eq!(body.lines().count(), 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn json_export_wraps_every_row(app: &mut TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;
    create_mapping(app, "bob", "lead-1", "Payments", "pm-1").await;

    let response = app.get_path("/mappings/export/json").await;
    assert_eq!(response.status().as_u16(), 200);

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert_eq!(disposition, "attachment; filename=mappings.json");

    let body = get_json_response_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(2));
    assert!(body["exportedAt"].as_str().unwrap().ends_with('Z'));

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    for row in data {
        assert!(row["id"].is_i64());
        assert!(row["team_member_id"].is_string());
        assert!(row["created_at"].is_string());
    }
}
