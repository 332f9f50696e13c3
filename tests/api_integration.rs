//! End-to-end API integration tests
//!
//! These tests drive the HTTP router over the in-memory store:
//! - Team creation, replacement, retrieval and deletion
//! - Paginated listing
//! - Validation and not-found error bodies

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use team_roster_api::api;
use team_roster_api::application::TeamService;
use team_roster_api::infrastructure::repositories::InMemoryTeamRepository;
use tower::util::ServiceExt; // for oneshot

/// Setup test application over an empty in-memory store
fn setup_app() -> Router {
    let repository = Arc::new(InMemoryTeamRepository::new());
    api::router(TeamService::new(repository))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_team_lifecycle_flow() {
    let app = setup_app();

    // Step 1: Create team without players
    let (status, created) = send(
        &app,
        "POST",
        "/api/teams",
        Some(json!({
            "name": "Nice",
            "acronym": "NC",
            "budget": 1000000.00,
            "players": []
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_i64());
    assert_eq!(created["budget"], json!(1000000.0));
    assert_eq!(created["players"], json!([]));
    let id = created["id"].as_i64().unwrap();

    // Step 2: Replace it with a roster
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/teams/{}", id),
        Some(json!({
            "name": "Nice",
            "acronym": "NC",
            "budget": 1200000.00,
            "players": [
                {"name": "Messi", "position": "Forward"},
                {"name": "Drogba", "position": "Midfielder"}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["budget"], json!(1200000.0));
    let players = updated["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert!(players.iter().all(|p| p["id"].is_i64()));
    assert_eq!(players[0]["name"], "Messi");
    assert_eq!(players[1]["position"], "Midfielder");

    // Step 3: Read it back
    let (status, fetched) = send(&app, "GET", &format!("/api/teams/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    // Step 4: Delete it
    let (status, body) = send(&app, "DELETE", &format!("/api/teams/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // Step 5: It is gone
    let (status, body) = send(&app, "GET", &format!("/api/teams/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Team not found by id: {}", id));
}

#[tokio::test]
async fn test_update_assigns_new_player_ids() {
    let app = setup_app();
    let payload = json!({
        "name": "Nice",
        "acronym": "NC",
        "budget": 10.5,
        "players": [{"name": "Messi", "position": "Forward"}]
    });

    let (_, created) = send(&app, "POST", "/api/teams", Some(payload.clone())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(&app, "PUT", &format!("/api/teams/{}", id), Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(updated["players"][0]["id"], created["players"][0]["id"]);
    assert_eq!(updated["players"][0]["name"], "Messi");
}

#[tokio::test]
async fn test_create_with_invalid_payload_lists_fields() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/teams",
        Some(json!({
            "name": "",
            "budget": -1,
            "players": [{"name": "Messi", "position": ""}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["fields"]["name"], "Team name cannot be empty or null");
    assert_eq!(body["fields"]["acronym"], "Team acronym cannot be null or empty");
    assert_eq!(body["fields"]["budget"], "Team budget must be a positive number");
    assert_eq!(
        body["fields"]["players[0].position"],
        "Player position cannot be empty"
    );

    // Nothing was stored
    let (_, page) = send(&app, "GET", "/api/teams", None).await;
    assert_eq!(page["total_elements"], 0);
}

#[tokio::test]
async fn test_create_with_null_players_is_rejected() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/teams",
        Some(json!({"name": "Nice", "acronym": "NC", "budget": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["players"], "Team Players list cannot be null");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/teams")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_team_is_not_found() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "PUT",
        "/api/teams/404",
        Some(json!({"name": "Nice", "acronym": "NC", "budget": 1, "players": []})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Team not found by id: 404");
}

#[tokio::test]
async fn test_delete_unknown_team_is_not_found() {
    let app = setup_app();

    let (status, body) = send(&app, "DELETE", "/api/teams/9", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Team not found by id: 9");
}

#[tokio::test]
async fn test_list_teams_with_pagination() {
    let app = setup_app();

    for i in 1..=6 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/teams",
            Some(json!({
                "name": format!("Team {}", i),
                "acronym": format!("T{}", i),
                "budget": 100000 * i,
                "players": [
                    {"name": format!("Player {}-1", i), "position": "Position 1"},
                    {"name": format!("Player {}-2", i), "position": "Position 2"}
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, "GET", "/api/teams?page=0&size=2", None).await;

    assert_eq!(status, StatusCode::OK);
    let content = page["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(page["total_elements"], 6);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["page_number"], 0);
    assert_eq!(page["page_size"], 2);
    assert_eq!(content[0]["name"], "Team 1");
    assert_eq!(content[0]["players"].as_array().unwrap().len(), 2);
    assert_eq!(content[0]["players"][0]["name"], "Player 1-1");
}

#[tokio::test]
async fn test_list_teams_rejects_zero_page_size() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/api/teams?size=0", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["size"], "Page size must be between 1 and 100");
}

#[tokio::test]
async fn test_non_numeric_id_returns_json_error() {
    let app = setup_app();

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/api/teams/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string(), "{} should return a JSON error body", method);
    }

    let (status, body) = send(
        &app,
        "PUT",
        "/api/teams/abc",
        Some(json!({"name": "Nice", "acronym": "NC", "budget": 1, "players": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_budget_finer_than_cents_is_rejected() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/teams",
        Some(json!({"name": "Nice", "acronym": "NC", "budget": 1.234, "players": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["budget"],
        "Team budget must have at most 17 integer digits and 2 decimal places"
    );

    let (_, page) = send(&app, "GET", "/api/teams", None).await;
    assert_eq!(page["total_elements"], 0);
}
