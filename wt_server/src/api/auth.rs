//! Account API handlers.
//!
//! Register:
//! ```bash
//! curl -X POST http://localhost:3000/api/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"username": "alice", "email": "alice@x.com", "password": "Secret1!", "fullName": "Alice"}'
//! ```
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:3000/api/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "alice@x.com", "password": "Secret1!"}'
//! ```

use axum::{
    Json,
    extract::{Extension, Path, State, rejection::JsonRejection, rejection::PathRejection},
};
use serde::{Deserialize, Serialize};
use workout_tracker::auth::{AuthError, LoginRequest, RegisterRequest, UserId, UserProfile};

use super::{
    AppState, MessageResponse,
    error::{ApiError, ApiResult},
    request_id::RequestId,
};
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

/// Create an account
///
/// # Response
///
/// ```json
/// { "message": "User registered successfully", "userId": 42 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or malformed field, or username/email taken
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> ApiResult<Json<RegisterResponse>> {
    let Json(payload) = payload?;

    let user_id = state
        .auth_manager
        .register(RegisterRequest {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            full_name: payload.full_name,
        })
        .await?;

    metrics::registrations_total();

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// Authenticate by email and password
///
/// # Response
///
/// ```json
/// {
///   "message": "Login successful",
///   "user": { "userId": 42, "username": "alice", "email": "alice@x.com",
///             "fullName": "Alice", "streak": 0, "totalWorkouts": 0 },
///   "token": "eyJhbGciOiJIUzI1NiIs..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password, indistinguishably
pub async fn login(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;

    let outcome = state
        .auth_manager
        .login(LoginRequest {
            email: payload.email,
            password: payload.password,
        })
        .await;

    match outcome {
        Ok(outcome) => {
            metrics::login_attempts_total(true);
            Ok(Json(LoginResponse {
                message: "Login successful".to_string(),
                user: outcome.user,
                token: outcome.access_token,
            }))
        }
        Err(e) => {
            metrics::login_attempts_total(false);
            if matches!(e, AuthError::InvalidCredentials) {
                logging::log_security_event(
                    "failed_login",
                    None,
                    &format!("Invalid credentials (request {})", request_id.as_str()),
                );
            }
            Err(e.into())
        }
    }
}

/// Public projection of a user
///
/// # Errors
///
/// - `404 Not Found`: No such user
pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<UserProfile>> {
    let Path(user_id) = user_id?;
    Ok(Json(state.auth_manager.get_user(user_id).await?))
}

/// Projection of the authenticated caller
pub async fn me(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.auth_manager.get_user(user_id).await?))
}

/// Delete the caller's own account with all workouts and goals
///
/// # Errors
///
/// - `403 Forbidden`: Path names another user
/// - `404 Not Found`: Account already gone
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(caller): Extension<UserId>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(user_id) = user_id?;
    if user_id != caller {
        logging::log_security_event(
            "forbidden_delete",
            Some(caller),
            &format!("Attempted to delete account {user_id}"),
        );
        return Err(ApiError::forbidden());
    }

    state.auth_manager.delete_user(user_id).await?;

    Ok(Json(MessageResponse::new("Account deleted successfully")))
}
