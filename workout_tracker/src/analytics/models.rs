//! Analytics result models.
//!
//! Field names follow the SQL aliases the front end reads.

use crate::auth::UserId;
use crate::workouts::{Difficulty, WorkoutId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate totals over all of a user's workouts
///
/// Counts and sums are 0 for a user without workouts; average and maximum
/// are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    pub total_workouts: i64,
    pub total_reps: i64,
    pub total_weight: f64,
    pub total_duration: i64,
    pub avg_duration: Option<f64>,
    pub max_weight: Option<f64>,
}

/// Per-exercise aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBreakdown {
    pub exercise_name: String,
    pub session_count: i64,
    pub total_reps: i64,
    pub avg_weight: f64,
    pub max_weight: f64,
}

/// One workout joined with its owner's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWorkoutRow {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub streak: i32,
    pub total_workouts: i32,
    pub workout_id: WorkoutId,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub duration: i32,
    pub difficulty: Option<Difficulty>,
    pub workout_date: NaiveDate,
    pub notes: Option<String>,
}
