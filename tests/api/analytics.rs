use serde_json::json;
use test_context::test_context;

use crate::helpers::{create_mapping, get_json_response_body, TestApp};

async fn seed_teams(app: &TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;
    create_mapping(app, "bob", "lead-1", "Broadcast", "pm-1").await;
    create_mapping(app, "carol", "lead-2", "Broadcast", "pm-2").await;
    create_mapping(app, "dave", "lead-2", "Payments", "pm-2").await;
    create_mapping(app, "erin", "", "Payments", "").await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn statistics_summarise_the_table(app: &mut TestApp) {
    seed_teams(app).await;

    let body =
        get_json_response_body(app.get_path("/mappings/stats").await).await;
    assert_eq!(body["success"], json!(true));

    let stats = &body["data"];
    assert_eq!(stats["totalMappings"], json!(5));
    assert_eq!(stats["uniqueProjects"], json!(2));
    assert_eq!(stats["uniqueMembers"], json!(5));
    // Empty lead/manager values do not count as distinct people.
    assert_eq!(stats["uniqueLeads"], json!(2));
    assert_eq!(stats["uniquePMs"], json!(2));
    // Everything was created just now, inside the trailing-7-days window.
    assert_eq!(stats["recentMappings"], json!(5));
}

#[test_context(TestApp)]
#[tokio::test]
async fn project_distribution_orders_by_member_count(app: &mut TestApp) {
    seed_teams(app).await;

    let body = get_json_response_body(
        app.get_path("/mappings/analytics/projects").await,
    )
    .await;
    assert_eq!(body["success"], json!(true));

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["project_name"], "Broadcast");
    assert_eq!(data[0]["member_count"], json!(3));
    assert_eq!(data[0]["lead_count"], json!(2));
    assert_eq!(data[0]["pm_count"], json!(2));

    assert_eq!(data[1]["project_name"], "Payments");
    assert_eq!(data[1]["member_count"], json!(2));
}

#[test_context(TestApp)]
#[tokio::test]
async fn lead_performance_excludes_unassigned_rows(app: &mut TestApp) {
    seed_teams(app).await;

    let body = get_json_response_body(
        app.get_path("/mappings/analytics/leads").await,
    )
    .await;

    let data = body["data"].as_array().unwrap();
    let leads: Vec<&str> = data
        .iter()
        .map(|row| row["team_lead_id"].as_str().unwrap())
        .collect();
    assert!(!leads.contains(&""));
    assert_eq!(data.len(), 2);

    for row in data {
        match row["team_lead_id"].as_str().unwrap() {
            "lead-1" => {
                assert_eq!(row["team_size"], json!(2));
                assert_eq!(row["project_count"], json!(1));
                assert_eq!(row["pm_count"], json!(1));
            }
            "lead-2" => {
                assert_eq!(row["team_size"], json!(2));
                assert_eq!(row["project_count"], json!(2));
                assert_eq!(row["pm_count"], json!(1));
            }
            other => panic!("unexpected lead in analytics: {other}"),
        }
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn manager_overview_excludes_unassigned_rows(app: &mut TestApp) {
    seed_teams(app).await;

    let body = get_json_response_body(
        app.get_path("/mappings/analytics/managers").await,
    )
    .await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    for row in data {
        match row["project_manager_id"].as_str().unwrap() {
            "pm-1" => {
                assert_eq!(row["total_members"], json!(2));
                assert_eq!(row["project_count"], json!(1));
                assert_eq!(row["lead_count"], json!(1));
            }
            "pm-2" => {
                assert_eq!(row["total_members"], json!(2));
                assert_eq!(row["project_count"], json!(2));
                assert_eq!(row["lead_count"], json!(1));
            }
            other => panic!("unexpected manager in analytics: {other}"),
        }
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn analytics_of_an_empty_table_are_empty(app: &mut TestApp) {
    for path in [
        "/mappings/analytics/projects",
        "/mappings/analytics/leads",
        "/mappings/analytics/managers",
    ] {
        let body = get_json_response_body(app.get_path(path).await).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    let body =
        get_json_response_body(app.get_path("/mappings/stats").await).await;
    assert_eq!(body["data"]["totalMappings"], json!(0));
    assert_eq!(body["data"]["recentMappings"], json!(0));
}
