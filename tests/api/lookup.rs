use serde_json::json;
use test_context::test_context;

use crate::helpers::{create_mapping, get_json_response_body, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn lists_members_of_a_project_newest_first(app: &mut TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;
    create_mapping(app, "bob", "lead-1", "Payments", "pm-2").await;
    create_mapping(app, "carol", "lead-2", "Broadcast", "pm-1").await;

    let body = get_json_response_body(
        app.get_path("/mappings/project/Broadcast").await,
    )
    .await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(2));

    let members: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["team_member_id"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["carol", "alice"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn lists_projects_of_a_member_newest_first(app: &mut TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;
    create_mapping(app, "alice", "lead-2", "Payments", "pm-2").await;
    create_mapping(app, "bob", "lead-1", "Broadcast", "pm-1").await;

    let body =
        get_json_response_body(app.get_path("/mappings/member/alice").await)
            .await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(2));

    let projects: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["project_name"].as_str().unwrap())
        .collect();
    assert_eq!(projects, vec!["Payments", "Broadcast"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn unknown_names_yield_empty_results(app: &mut TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;

    for path in ["/mappings/project/Nonesuch", "/mappings/member/mallory"] {
        let body = get_json_response_body(app.get_path(path).await).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["count"], json!(0));
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }
}
