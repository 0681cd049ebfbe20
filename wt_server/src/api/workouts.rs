//! Workout ledger API handlers.
//!
//! Request bodies use camelCase keys; listed entries come back with the
//! snake_case column names of `logged_workouts`.
//!
//! Log a workout:
//! ```bash
//! curl -X POST http://localhost:3000/api/workouts \
//!   -H "Content-Type: application/json" \
//!   -d '{"userId": 1, "exerciseName": "Squats", "sets": 4, "reps": 15, "weight": 135,
//!        "duration": 20, "difficulty": "hard", "workoutDate": "2025-10-21"}'
//! ```

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use workout_tracker::{
    auth::UserId,
    workouts::{Difficulty, NewWorkout, WorkoutEntry, WorkoutId, WorkoutResult, WorkoutUpdate},
};

use super::{AppState, MessageResponse, error::ApiResult};
use crate::metrics;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWorkoutPayload {
    pub user_id: UserId,
    #[serde(default)]
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub duration: i32,
    pub difficulty: Option<String>,
    pub workout_date: NaiveDate,
    pub workout_time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutPayload {
    #[serde(default)]
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub duration: i32,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWorkoutResponse {
    pub message: String,
    pub workout_id: WorkoutId,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkoutResponse {
    pub message: String,
    pub total_workouts: i32,
    pub streak: i32,
}

/// Empty strings from form fields mean "not given"
fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_difficulty(value: Option<String>) -> WorkoutResult<Option<Difficulty>> {
    blank_to_none(value)
        .map(|d| d.to_lowercase().parse())
        .transpose()
}

/// Log a workout for a user
///
/// # Response
///
/// ```json
/// { "message": "Workout logged successfully", "workoutId": 17 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid field
/// - `404 Not Found`: Unknown user
pub async fn log_workout(
    State(state): State<AppState>,
    payload: Result<Json<LogWorkoutPayload>, JsonRejection>,
) -> ApiResult<Json<LogWorkoutResponse>> {
    let Json(payload) = payload?;

    let workout_id = state
        .workout_manager
        .log_workout(NewWorkout {
            user_id: payload.user_id,
            exercise_name: payload.exercise_name,
            sets: payload.sets,
            reps: payload.reps,
            weight: payload.weight.unwrap_or(0.0),
            duration: payload.duration,
            difficulty: parse_difficulty(payload.difficulty)?,
            workout_date: payload.workout_date,
            workout_time: payload.workout_time,
            notes: blank_to_none(payload.notes),
        })
        .await?;

    metrics::workouts_logged_total();

    Ok(Json(LogWorkoutResponse {
        message: "Workout logged successfully".to_string(),
        workout_id,
    }))
}

/// All workouts of a user, newest first
pub async fn list_workouts(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<Vec<WorkoutEntry>>> {
    let Path(user_id) = user_id?;
    Ok(Json(state.workout_manager.list_workouts(user_id).await?))
}

/// A single workout
pub async fn get_workout(
    State(state): State<AppState>,
    workout_id: Result<Path<WorkoutId>, PathRejection>,
) -> ApiResult<Json<WorkoutEntry>> {
    let Path(workout_id) = workout_id?;
    Ok(Json(state.workout_manager.get_workout(workout_id).await?))
}

/// Replace a workout's editable fields
///
/// # Errors
///
/// - `400 Bad Request`: Invalid field
/// - `404 Not Found`: Unknown workout
pub async fn update_workout(
    State(state): State<AppState>,
    workout_id: Result<Path<WorkoutId>, PathRejection>,
    payload: Result<Json<UpdateWorkoutPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(workout_id) = workout_id?;
    let Json(payload) = payload?;

    state
        .workout_manager
        .update_workout(
            workout_id,
            WorkoutUpdate {
                exercise_name: payload.exercise_name,
                sets: payload.sets,
                reps: payload.reps,
                weight: payload.weight.unwrap_or(0.0),
                duration: payload.duration,
                difficulty: parse_difficulty(payload.difficulty)?,
                notes: blank_to_none(payload.notes),
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Workout updated successfully")))
}

/// Delete a workout
///
/// The response carries the owner's counters after the delete.
///
/// # Errors
///
/// - `404 Not Found`: Unknown workout
pub async fn delete_workout(
    State(state): State<AppState>,
    workout_id: Result<Path<WorkoutId>, PathRejection>,
) -> ApiResult<Json<DeleteWorkoutResponse>> {
    let Path(workout_id) = workout_id?;

    let totals = state.workout_manager.delete_workout(workout_id).await?;

    metrics::workouts_deleted_total();

    Ok(Json(DeleteWorkoutResponse {
        message: "Workout deleted successfully".to_string(),
        total_workouts: totals.total_workouts,
        streak: totals.streak,
    }))
}
