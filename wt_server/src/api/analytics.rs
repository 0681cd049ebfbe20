//! Read-only statistics handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use workout_tracker::{
    analytics::{ExerciseBreakdown, UserWorkoutRow, WorkoutStats},
    auth::UserId,
    workouts::WorkoutEntry,
};

use super::{AppState, error::ApiResult};

pub async fn get_stats(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<WorkoutStats>> {
    let Path(user_id) = user_id?;
    Ok(Json(state.analytics_manager.get_stats(user_id).await?))
}

pub async fn get_exercise_breakdown(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<Vec<ExerciseBreakdown>>> {
    let Path(user_id) = user_id?;
    Ok(Json(
        state
            .analytics_manager
            .get_exercise_breakdown(user_id)
            .await?,
    ))
}

pub async fn get_recent_workouts(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<Vec<WorkoutEntry>>> {
    let Path(user_id) = user_id?;
    Ok(Json(
        state.analytics_manager.get_recent_workouts(user_id).await?,
    ))
}

pub async fn get_user_workouts(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<Vec<UserWorkoutRow>>> {
    let Path(user_id) = user_id?;
    Ok(Json(
        state
            .analytics_manager
            .get_user_with_workouts(user_id)
            .await?,
    ))
}
