// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile and team API tests.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

async fn create_team(app: &axum::Router, coach_id: &str, name: &str) -> Value {
    let (status, body) = common::send_json(
        app,
        "POST",
        "/api/teams",
        Some(json!({ "coach_id": coach_id, "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create team failed: {}", body);
    body
}

#[tokio::test]
async fn test_user_profile_lifecycle() {
    let (app, _) = common::create_test_app();
    let user_id = common::create_user(&app, "Jane Smith", "swimmer").await;
    let uri = format!("/api/users/{}", user_id);

    let (status, body) = common::send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "swimmer");
    assert_eq!(body["email"], "jane.smith@example.com");

    let (status, body) = common::send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": "Jane S.", "role": "coach" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jane S.");
    assert_eq!(body["role"], "coach");
}

#[tokio::test]
async fn test_create_user_validation_and_conflict() {
    let (app, _) = common::create_test_app();

    let (status, _) = common::send_json(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "email": "not-an-email", "name": "X", "role": "swimmer" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::create_user(&app, "Jane Smith", "swimmer").await;
    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/users",
        Some(json!({
            "email": "jane.smith@example.com",
            "name": "Other Jane",
            "role": "swimmer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, _) = common::send_json(
        &app,
        "GET",
        &format!("/api/users/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_coach_creates_team_and_swimmer_joins() {
    let (app, _) = common::create_test_app();
    let coach_id = common::create_user(&app, "Coach Carter", "coach").await;
    let swimmer_id = common::create_user(&app, "Jane Smith", "swimmer").await;

    let team = create_team(&app, &coach_id, "Sharks").await;
    let code = team["team_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/teams/join",
        Some(json!({ "user_id": swimmer_id, "team_code": code.to_lowercase() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["id"], team["id"]);

    let (status, _) = common::send_json(
        &app,
        "POST",
        "/api/teams/join",
        Some(json!({ "user_id": swimmer_id, "team_code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, members) = common::send_json(
        &app,
        "GET",
        &format!("/api/teams/{}/members", team["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(members.as_array().unwrap().len(), 1);
    assert_eq!(members[0]["user"]["name"], "Jane Smith");

    let (_, coach_teams) = common::send_json(
        &app,
        "GET",
        &format!("/api/users/{}/teams", coach_id),
        None,
    )
    .await;
    assert_eq!(coach_teams[0]["name"], "Sharks");
    assert_eq!(coach_teams[0]["members"].as_array().unwrap().len(), 1);

    let (_, swimmer_teams) = common::send_json(
        &app,
        "GET",
        &format!("/api/users/{}/teams", swimmer_id),
        None,
    )
    .await;
    assert_eq!(swimmer_teams[0]["id"], team["id"]);
}

#[tokio::test]
async fn test_team_errors() {
    let (app, _) = common::create_test_app();
    let swimmer_id = common::create_user(&app, "Jane Smith", "swimmer").await;

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/teams",
        Some(json!({ "coach_id": swimmer_id, "name": "Minnows" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Only coaches can create teams");

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/teams/join",
        Some(json!({ "user_id": swimmer_id, "team_code": "ZZZZZZ" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "Invalid team code");

    let (status, _) = common::send_json(
        &app,
        "GET",
        &format!("/api/teams/{}/members", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_import_attributes_rows_to_members() {
    let (app, _) = common::create_test_app();
    let coach_id = common::create_user(&app, "Coach Carter", "coach").await;
    let swimmer_id = common::create_user(&app, "Jane Smith", "swimmer").await;
    let outsider_id = common::create_user(&app, "Outsider", "swimmer").await;

    let team = create_team(&app, &coach_id, "Sharks").await;
    let team_id = team["id"].as_str().unwrap();
    common::send_json(
        &app,
        "POST",
        "/api/teams/join",
        Some(json!({ "user_id": swimmer_id, "team_code": team["team_code"] })),
    )
    .await;

    let data = "jane smith, Freestyle, 100, 1:02.45, Time Trial\n\
                Walk On, Freestyle, 100, 1:09.00, Time Trial";
    let (status, body) = common::send_json(
        &app,
        "POST",
        &format!("/api/users/{}/times/import", coach_id),
        Some(json!({ "data": data, "team_id": team_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["count"], 2);
    assert_eq!(body["matched_members"], 1);

    let (_, mine) = common::send_json(
        &app,
        "GET",
        &format!("/api/users/{}/times", swimmer_id),
        None,
    )
    .await;
    assert_eq!(mine["total"], 1);
    assert_eq!(mine["entries"][0]["time"], "01:02.45");

    let (_, team_view) = common::send_json(
        &app,
        "GET",
        &format!("/api/users/{}/times?team_id={}", coach_id, team_id),
        None,
    )
    .await;
    assert_eq!(team_view["total"], 2);

    let (status, _) = common::send_json(
        &app,
        "GET",
        &format!("/api/users/{}/times?team_id={}", outsider_id, team_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
