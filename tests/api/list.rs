use serde_json::{json, Value};
use team_mapper::ErrorResponse;
use test_context::test_context;

use crate::helpers::{create_mapping, get_json_response_body, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn filters_by_equality_and_search(app: &mut TestApp) {
    create_mapping(app, "alice", "lead-1", "Broadcast", "pm-1").await;
    create_mapping(app, "bob", "lead-1", "Payments", "pm-2").await;
    create_mapping(app, "carol", "lead-2", "Broadcast", "pm-1").await;

    let body = get_json_response_body(
        app.get_mappings(&[("projectName", "Broadcast")]).await,
    )
    .await;
    assert_eq!(body["pagination"]["total"], json!(2));
    for row in body["data"].as_array().unwrap() {
        assert_eq!(row["project_name"], "Broadcast");
    }

    let body = get_json_response_body(
        app.get_mappings(&[("teamLeadId", "lead-1")]).await,
    )
    .await;
    assert_eq!(body["pagination"]["total"], json!(2));

    let body = get_json_response_body(
        app.get_mappings(&[
            ("teamLeadId", "lead-1"),
            ("projectName", "Payments"),
        ])
        .await,
    )
    .await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"][0]["team_member_id"], "bob");

    // Case-insensitive substring, OR-ed across all four identifier fields.
    let body =
        get_json_response_body(app.get_mappings(&[("search", "ROAD")]).await)
            .await;
    assert_eq!(body["pagination"]["total"], json!(2));

    let body =
        get_json_response_body(app.get_mappings(&[("search", "pm-2")]).await)
            .await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"][0]["team_member_id"], "bob");
}

#[test_context(TestApp)]
#[tokio::test]
async fn paginates_without_gaps_or_duplicates(app: &mut TestApp) {
    for n in 1..=5 {
        create_mapping(app, &format!("member-{n}"), "", "Broadcast", "")
            .await;
    }

    let mut seen_ids = Vec::new();
    for page in 1..=3 {
        let body = get_json_response_body(
            app.get_mappings(&[
                ("page", page.to_string().as_str()),
                ("limit", "2"),
                ("sortBy", "id"),
                ("sortOrder", "ASC"),
            ])
            .await,
        )
        .await;

        let pagination = &body["pagination"];
        assert_eq!(pagination["page"], json!(page));
        assert_eq!(pagination["limit"], json!(2));
        assert_eq!(pagination["total"], json!(5));
        assert_eq!(pagination["totalPages"], json!(3));
        assert_eq!(pagination["hasNext"], json!(page * 2 < 5));
        assert_eq!(pagination["hasPrev"], json!(page > 1));

        for row in body["data"].as_array().unwrap() {
            seen_ids.push(row["id"].as_i64().unwrap());
        }
    }

    // Concatenating the pages yields every row exactly once, in order.
    let mut sorted = seen_ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(seen_ids.len(), 5);
    assert_eq!(sorted.len(), 5);
    assert_eq!(seen_ids, sorted);
}

#[test_context(TestApp)]
#[tokio::test]
async fn off_list_sort_column_behaves_like_created_at(app: &mut TestApp) {
    for n in 1..=4 {
        create_mapping(app, &format!("member-{n}"), "", "Broadcast", "")
            .await;
    }

    let ids = |body: &Value| -> Vec<i64> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect()
    };

    let injected = get_json_response_body(
        app.get_mappings(&[(
            "sortBy",
            "created_at; DROP TABLE user_team_mappings",
        )])
        .await,
    )
    .await;
    let baseline = get_json_response_body(
        app.get_mappings(&[("sortBy", "created_at")]).await,
    )
    .await;

    assert_eq!(ids(&injected), ids(&baseline));

    // The table survived the attempt.
    let body = get_json_response_body(app.get_mappings(&[]).await).await;
    assert_eq!(body["pagination"]["total"], json!(4));
}

#[test_context(TestApp)]
#[tokio::test]
async fn sorts_by_allowed_columns(app: &mut TestApp) {
    create_mapping(app, "charlie", "", "Broadcast", "").await;
    create_mapping(app, "alice", "", "Broadcast", "").await;
    create_mapping(app, "bob", "", "Broadcast", "").await;

    let body = get_json_response_body(
        app.get_mappings(&[
            ("sortBy", "team_member_id"),
            ("sortOrder", "ASC"),
        ])
        .await,
    )
    .await;

    let members: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["team_member_id"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["alice", "bob", "charlie"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn rejects_out_of_range_pagination(app: &mut TestApp) {
    let test_cases = [
        (("page", "0"), "Page must be greater than 0"),
        (("limit", "0"), "Limit must be between 1 and 100"),
        (("limit", "101"), "Limit must be between 1 and 100"),
    ];

    for ((key, value), expected_message) in test_cases {
        let response = app.get_mappings(&[(key, value)]).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP 400 for {key}={value}"
        );
        let error = response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse");
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.message, expected_message);
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn simple_listing_returns_newest_first(app: &mut TestApp) {
    create_mapping(app, "alice", "", "Broadcast", "").await;
    create_mapping(app, "bob", "", "Payments", "").await;

    let body =
        get_json_response_body(app.get_path("/mappings/simple").await).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(2));

    let members: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["team_member_id"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["bob", "alice"]);
}
