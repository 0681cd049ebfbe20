//! Integration tests for the HTTP API.
//!
//! Drives the router in-process with `oneshot`. Uses `DATABASE_URL`,
//! falling back to a local `workout_test` database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method
use workout_tracker::auth::AuthManager;
use workout_tracker::db::{Database, DatabaseConfig};
use wt_server::api::{AppState, create_router};

async fn create_test_server() -> Router {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/workout_test".to_string());

    let db = Database::new(&DatabaseConfig::development().with_url(database_url))
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Migrations failed");

    let pool = Arc::new(db.pool().clone());
    let auth_manager = AuthManager::new(
        pool.clone(),
        "test_pepper_for_testing_only".to_string(),
        "test_secret_key_for_testing_only_0123".to_string(),
    );

    create_router(AppState::new(pool, auth_manager))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_token(app, method, uri, body, None).await
}

async fn send_with_token(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a fresh user and log in; returns (user id, token)
async fn register_and_login(app: &Router) -> (i64, String) {
    let suffix: u32 = rand::random();
    let email = format!("api{suffix}@example.com");

    let (status, body) = send(
        app,
        "POST",
        "/api/register",
        Some(json!({
            "username": format!("api{suffix}"),
            "email": email,
            "password": "Secret1!",
            "fullName": "Api Tester"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "User registered successfully");
    let user_id = body["userId"].as_i64().unwrap();

    let (status, body) = send(
        app,
        "POST",
        "/api/login",
        Some(json!({ "email": email, "password": "Secret1!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["userId"], user_id);
    assert_eq!(body["user"]["streak"], 0);
    assert_eq!(body["user"]["totalWorkouts"], 0);

    (user_id, body["token"].as_str().unwrap().to_string())
}

async fn delete_account(app: &Router, user_id: i64, token: &str) {
    let (status, _) = send_with_token(
        app,
        "DELETE",
        &format!("/api/user/{user_id}"),
        None,
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_server().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_server().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-42"
    );
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = create_test_server().await;
    let (user_id, token) = register_and_login(&app).await;

    let (_, profile) = send(&app, "GET", &format!("/api/user/{user_id}"), None).await;
    let email = profile["email"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "email": email, "password": "Wrong123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    delete_account(&app, user_id, &token).await;
}

#[tokio::test]
async fn test_register_errors_are_bad_request() {
    let app = create_test_server().await;
    let (user_id, token) = register_and_login(&app).await;
    let (_, profile) = send(&app, "GET", &format!("/api/user/{user_id}"), None).await;

    // Duplicate username
    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        Some(json!({
            "username": profile["username"],
            "email": format!("other{user_id}@example.com"),
            "password": "Secret1!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Missing email
    let (status, _) = send(
        &app,
        "POST",
        "/api/register",
        Some(json!({ "username": "someone_new", "password": "Secret1!" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    delete_account(&app, user_id, &token).await;
}

#[tokio::test]
async fn test_workout_lifecycle() {
    let app = create_test_server().await;
    let (user_id, token) = register_and_login(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "userId": user_id,
            "exerciseName": "Squats",
            "sets": 4,
            "reps": 15,
            "weight": 135,
            "duration": 20,
            "difficulty": "hard",
            "workoutDate": "2025-10-21",
            "workoutTime": "18:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Workout logged successfully");
    let workout_id = body["workoutId"].as_i64().unwrap();

    let (_, list) = send(&app, "GET", &format!("/api/workouts/{user_id}"), None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["exercise_name"], "Squats");
    assert_eq!(list[0]["workout_date"], "2025-10-21");
    assert_eq!(list[0]["difficulty"], "hard");

    let (_, stats) = send(&app, "GET", &format!("/api/stats/{user_id}"), None).await;
    assert_eq!(stats["total_workouts"], 1);
    assert_eq!(stats["total_reps"], 60);
    assert_eq!(stats["total_weight"], 135.0);
    assert_eq!(stats["total_duration"], 20);
    assert_eq!(stats["max_weight"], 135.0);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/workouts/{workout_id}"),
        Some(json!({
            "exerciseName": "Front Squats",
            "sets": 5,
            "reps": 5,
            "weight": 95,
            "duration": 25,
            "difficulty": "extreme"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, single) = send(&app, "GET", &format!("/api/workout/{workout_id}"), None).await;
    assert_eq!(single["exercise_name"], "Front Squats");

    let (_, profile) = send(&app, "GET", &format!("/api/user/{user_id}"), None).await;
    assert_eq!(profile["totalWorkouts"], 1);
    assert_eq!(profile["streak"], 1);

    let (status, body) = send(&app, "DELETE", &format!("/api/workouts/{workout_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalWorkouts"], 0);

    let (status, body) = send(&app, "DELETE", &format!("/api/workouts/{workout_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Workout not found");

    delete_account(&app, user_id, &token).await;
}

#[tokio::test]
async fn test_invalid_workout_is_bad_request() {
    let app = create_test_server().await;
    let (user_id, token) = register_and_login(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "userId": user_id,
            "exerciseName": "Squats",
            "sets": 0,
            "reps": 15,
            "duration": 20,
            "workoutDate": "2025-10-21"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/workouts/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "userId": user_id,
            "exerciseName": "Squats",
            "sets": 4,
            "reps": 15,
            "duration": 20,
            "workoutDate": "2025-10-21",
            "notes": "a\u{0}b"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Notes must not contain NUL characters");

    delete_account(&app, user_id, &token).await;
}

#[tokio::test]
async fn test_goal_completion_over_http() {
    let app = create_test_server().await;
    let (user_id, token) = register_and_login(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/goals",
        Some(json!({ "userId": user_id, "goalName": "500 Squats", "targetValue": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let goal_id = body["goalId"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/goals/{goal_id}/progress"),
        Some(json!({ "progress": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isCompleted"], true);

    let (_, goals) = send(&app, "GET", &format!("/api/goals/{user_id}"), None).await;
    let today = chrono::Utc::now().date_naive().to_string();
    assert_eq!(goals[0]["is_completed"], true);
    assert_eq!(goals[0]["completed_date"], today.as_str());

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/goals/{goal_id}/progress"),
        Some(json!({ "progress": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &format!("/api/goals/{goal_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/api/goals/{goal_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    delete_account(&app, user_id, &token).await;
}

#[tokio::test]
async fn test_protected_routes_require_owner() {
    let app = create_test_server().await;
    let (alice, alice_token) = register_and_login(&app).await;
    let (bob, bob_token) = register_and_login(&app).await;

    let (status, _) = send(&app, "GET", "/api/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send_with_token(&app, "GET", "/api/me", None, Some(&alice_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], alice);

    let (status, _) =
        send_with_token(&app, "GET", "/api/me", None, Some("not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_with_token(
        &app,
        "DELETE",
        &format!("/api/user/{alice}"),
        None,
        Some(&bob_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    delete_account(&app, alice, &alice_token).await;
    delete_account(&app, bob, &bob_token).await;

    let (status, _) = send(&app, "GET", &format!("/api/user/{alice}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_breakdowns_do_not_mix_users() {
    let app = create_test_server().await;
    let (alice, alice_token) = register_and_login(&app).await;
    let (bob, bob_token) = register_and_login(&app).await;

    for (user_id, name) in [(alice, "Deadlift"), (bob, "Bench Press")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/workouts",
            Some(json!({
                "userId": user_id,
                "exerciseName": name,
                "sets": 3,
                "reps": 5,
                "weight": 200,
                "duration": 15,
                "workoutDate": "2025-10-21"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, breakdown) = send(&app, "GET", &format!("/api/exercise-breakdown/{alice}"), None).await;
    let breakdown = breakdown.as_array().unwrap();
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0]["exercise_name"], "Deadlift");

    let (_, recent) = send(&app, "GET", &format!("/api/recent-workouts/{bob}"), None).await;
    assert_eq!(recent.as_array().unwrap().len(), 1);
    assert_eq!(recent[0]["exercise_name"], "Bench Press");

    let (_, joined) = send(&app, "GET", &format!("/api/user-workouts/{bob}"), None).await;
    assert_eq!(joined[0]["user_id"], bob);

    delete_account(&app, alice, &alice_token).await;
    delete_account(&app, bob, &bob_token).await;
}
