//! Workout ledger data models.

use crate::auth::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::WorkoutError;

/// Workout ID type
pub type WorkoutId = i64;

/// Perceived difficulty of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Extreme,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Moderate => write!(f, "moderate"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Extreme => write!(f, "extreme"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(WorkoutError::InvalidDifficulty(other.to_string())),
        }
    }
}

/// One logged exercise session
///
/// Serialized with the column names of `logged_workouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub workout_id: WorkoutId,
    pub user_id: UserId,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub duration: i32,
    pub difficulty: Option<Difficulty>,
    pub workout_date: NaiveDate,
    pub workout_time: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when logging a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub user_id: UserId,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub duration: i32,
    pub difficulty: Option<Difficulty>,
    pub workout_date: NaiveDate,
    pub workout_time: Option<String>,
    pub notes: Option<String>,
}

/// Mutable fields of an existing workout
///
/// Owner, date and time are fixed once logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutUpdate {
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub duration: i32,
    pub difficulty: Option<Difficulty>,
    pub notes: Option<String>,
}

/// Owner counters after a ledger mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_workouts: i32,
    pub streak: i32,
}
