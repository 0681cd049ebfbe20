//! REST API for the workout tracker.
//!
//! # Endpoints Overview
//!
//! ## Accounts
//! - `POST /api/register` - Register new user
//! - `POST /api/login` - Login by email, returns profile and access token
//! - `GET /api/user/{id}` - Public profile
//! - `GET /api/me` - Caller's profile (requires auth)
//! - `DELETE /api/user/{id}` - Delete own account (requires auth)
//!
//! ## Workouts
//! - `POST /api/workouts` - Log a workout
//! - `GET /api/workouts/{userId}` - List a user's workouts
//! - `GET /api/workout/{workoutId}` - Single workout
//! - `PUT /api/workouts/{workoutId}` - Edit a workout
//! - `DELETE /api/workouts/{workoutId}` - Delete a workout
//!
//! ## Goals
//! - `POST /api/goals` - Create a goal
//! - `GET /api/goals/{userId}` - List a user's goals
//! - `PUT /api/goals/{goalId}/progress` - Set progress
//! - `DELETE /api/goals/{goalId}` - Delete a goal
//!
//! ## Statistics
//! - `GET /api/stats/{userId}`
//! - `GET /api/exercise-breakdown/{userId}`
//! - `GET /api/recent-workouts/{userId}`
//! - `GET /api/user-workouts/{userId}`
//!
//! ## Health Check
//! - `GET /health` - Database reachability
//!
//! # CORS
//!
//! CORS is permissive; the browser front end is served from another origin
//! during development.

pub mod analytics;
pub mod auth;
pub mod error;
pub mod goals;
pub mod middleware;
pub mod request_id;
pub mod workouts;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use workout_tracker::{
    analytics::AnalyticsManager, auth::AuthManager, goals::GoalManager,
    workouts::WorkoutManager,
};

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub workout_manager: Arc<WorkoutManager>,
    pub goal_manager: Arc<GoalManager>,
    pub analytics_manager: Arc<AnalyticsManager>,
    pub pool: Arc<PgPool>,
}

impl AppState {
    /// Build every manager on top of one pool
    pub fn new(pool: Arc<PgPool>, auth_manager: AuthManager) -> Self {
        Self {
            auth_manager: Arc::new(auth_manager),
            workout_manager: Arc::new(WorkoutManager::new(pool.clone())),
            goal_manager: Arc::new(GoalManager::new(pool.clone())),
            analytics_manager: Arc::new(AnalyticsManager::new(pool.clone())),
            pool,
        }
    }
}

/// `{"message": "..."}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
///
/// Path parameters sharing a route prefix all use the `{id}` name, as the
/// router requires one parameter name per segment.
///
/// # Example
///
/// ```rust,no_run
/// # use wt_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let state: AppState = unimplemented!();
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let require_auth =
        axum::middleware::from_fn_with_state(state.clone(), middleware::auth_middleware);

    Router::new()
        // Accounts
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/me", get(auth::me).route_layer(require_auth.clone()))
        .route(
            "/api/user/{id}",
            get(auth::get_user).merge(delete(auth::delete_account).route_layer(require_auth)),
        )
        // Workouts
        .route("/api/workouts", post(workouts::log_workout))
        .route(
            "/api/workouts/{id}",
            get(workouts::list_workouts)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
        .route("/api/workout/{id}", get(workouts::get_workout))
        // Goals
        .route("/api/goals", post(goals::create_goal))
        .route(
            "/api/goals/{id}",
            get(goals::list_goals).delete(goals::delete_goal),
        )
        .route("/api/goals/{id}/progress", put(goals::update_progress))
        // Statistics
        .route("/api/stats/{id}", get(analytics::get_stats))
        .route(
            "/api/exercise-breakdown/{id}",
            get(analytics::get_exercise_breakdown),
        )
        .route(
            "/api/recent-workouts/{id}",
            get(analytics::get_recent_workouts),
        )
        .route("/api/user-workouts/{id}", get(analytics::get_user_workouts))
        .route_layer(axum::middleware::from_fn(middleware::track_metrics))
        .route("/health", get(health_check))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers, `503 Service Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .execute(state.pool.as_ref())
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
