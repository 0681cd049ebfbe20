//! Goal API handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use workout_tracker::{
    auth::UserId,
    goals::{Goal, GoalId, NewGoal},
};

use super::{
    AppState, MessageResponse,
    error::{ApiError, ApiResult},
};
use crate::metrics;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalPayload {
    pub user_id: UserId,
    #[serde(default)]
    pub goal_name: String,
    pub target_value: i32,
    /// `YYYY-MM-DD`; blank means no deadline
    pub deadline: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressPayload {
    pub progress: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalResponse {
    pub message: String,
    pub goal_id: GoalId,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub message: String,
    pub is_completed: bool,
    pub completed_date: Option<NaiveDate>,
}

fn parse_deadline(deadline: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    let Some(deadline) = deadline.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(&deadline, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ApiError::bad_request(format!("Invalid deadline: {deadline}")))
}

/// Create a goal
///
/// # Response
///
/// ```json
/// { "message": "Goal created successfully", "goalId": 3 }
/// ```
pub async fn create_goal(
    State(state): State<AppState>,
    payload: Result<Json<CreateGoalPayload>, JsonRejection>,
) -> ApiResult<Json<CreateGoalResponse>> {
    let Json(payload) = payload?;

    let goal_id = state
        .goal_manager
        .create_goal(NewGoal {
            user_id: payload.user_id,
            goal_name: payload.goal_name,
            target_value: payload.target_value,
            deadline: parse_deadline(payload.deadline)?,
        })
        .await?;

    Ok(Json(CreateGoalResponse {
        message: "Goal created successfully".to_string(),
        goal_id,
    }))
}

/// Goals of a user, open ones first
pub async fn list_goals(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<Vec<Goal>>> {
    let Path(user_id) = user_id?;
    Ok(Json(state.goal_manager.list_goals(user_id).await?))
}

/// Set a goal's progress
///
/// # Response
///
/// ```json
/// { "message": "Goal updated successfully", "isCompleted": true, "completedDate": "2025-11-15" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Negative progress
/// - `404 Not Found`: Unknown goal
pub async fn update_progress(
    State(state): State<AppState>,
    goal_id: Result<Path<GoalId>, PathRejection>,
    payload: Result<Json<ProgressPayload>, JsonRejection>,
) -> ApiResult<Json<ProgressResponse>> {
    let Path(goal_id) = goal_id?;
    let Json(payload) = payload?;

    let update = state
        .goal_manager
        .update_progress(goal_id, payload.progress)
        .await?;

    if update.newly_completed {
        metrics::goals_completed_total();
    }

    Ok(Json(ProgressResponse {
        message: "Goal updated successfully".to_string(),
        is_completed: update.is_completed,
        completed_date: update.completed_date,
    }))
}

/// Delete a goal
pub async fn delete_goal(
    State(state): State<AppState>,
    goal_id: Result<Path<GoalId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(goal_id) = goal_id?;
    state.goal_manager.delete_goal(goal_id).await?;
    Ok(Json(MessageResponse::new("Goal deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_deadline() {
        assert_eq!(parse_deadline(None).unwrap(), None);
        assert_eq!(parse_deadline(Some(String::new())).unwrap(), None);
        assert_eq!(
            parse_deadline(Some("2025-12-01".to_string())).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );

        let err = parse_deadline(Some("next week".to_string())).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
