use serde_json::json;
use test_context::test_context;

use crate::helpers::{create_mapping, get_json_response_body, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn reports_healthy_with_database_stats(app: &mut TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;

    let response = app.get_path("/health").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(body["uptime"]["seconds"].is_u64());
    assert!(body["uptime"]["formatted"].is_string());

    let database = &body["database"];
    assert_eq!(database["connected"], json!(true));
    assert!(database["responseTime"]
        .as_str()
        .unwrap()
        .ends_with("ms"));
    assert_eq!(database["stats"]["totalMappings"], json!(1));
    assert_eq!(database["stats"]["uniqueProjects"], json!(1));
}
