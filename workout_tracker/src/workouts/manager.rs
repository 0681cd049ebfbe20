//! Workout ledger manager.
//!
//! Inserts and deletes always run in one transaction with the owner's
//! `total_workouts` and `streak` update.

use super::{
    errors::{WorkoutError, WorkoutResult},
    models::{LedgerTotals, NewWorkout, WorkoutEntry, WorkoutId, WorkoutUpdate},
    streak::compute_streak,
};
use crate::auth::UserId;
use crate::errors::{has_nul, is_foreign_key_violation};
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};
use std::sync::Arc;

pub(crate) const WORKOUT_COLUMNS: &str = "workout_id, user_id, exercise_name, sets, reps, weight, duration, \
     difficulty, workout_date, workout_time, notes, created_at";

/// Workout ledger manager
#[derive(Clone)]
pub struct WorkoutManager {
    pool: Arc<PgPool>,
}

impl WorkoutManager {
    /// Create a new workout manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Log a workout and bump the owner's counters
    ///
    /// # Returns
    ///
    /// * `WorkoutResult<WorkoutId>` - Id of the new entry
    ///
    /// # Errors
    ///
    /// * Validation variants - A field violates its constraint
    /// * `WorkoutError::UserNotFound` - Owner does not exist
    pub async fn log_workout(&self, workout: NewWorkout) -> WorkoutResult<WorkoutId> {
        validate_fields(
            &workout.exercise_name,
            workout.sets,
            workout.reps,
            workout.weight,
            workout.duration,
            workout.notes.as_deref(),
        )?;
        let workout_time = normalize_workout_time(workout.workout_time.as_deref())?;

        let mut tx = self.pool.begin().await?;

        // Row lock on the owner serializes concurrent ledger writes for this user
        let total_workouts: i32 = sqlx::query(
            "UPDATE users SET total_workouts = total_workouts + 1 WHERE user_id = $1 RETURNING total_workouts",
        )
        .bind(workout.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WorkoutError::UserNotFound(workout.user_id))?
        .get("total_workouts");

        let row = sqlx::query(
            r#"
            INSERT INTO logged_workouts
                (user_id, exercise_name, sets, reps, weight, duration, difficulty, workout_date, workout_time, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING workout_id
            "#,
        )
        .bind(workout.user_id)
        .bind(workout.exercise_name.trim())
        .bind(workout.sets)
        .bind(workout.reps)
        .bind(workout.weight)
        .bind(workout.duration)
        .bind(workout.difficulty.map(|d| d.to_string()))
        .bind(workout.workout_date)
        .bind(workout_time)
        .bind(&workout.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                WorkoutError::UserNotFound(workout.user_id)
            } else {
                WorkoutError::Database(e)
            }
        })?;

        let workout_id: WorkoutId = row.get("workout_id");
        let streak = refresh_streak(&mut tx, workout.user_id).await?;

        tx.commit().await?;

        log::info!(
            "Logged workout {workout_id} for user {} (total_workouts={total_workouts}, streak={streak})",
            workout.user_id
        );

        Ok(workout_id)
    }

    /// List a user's workouts, newest date first, then newest entry first
    ///
    /// Returns an empty list for users without workouts.
    pub async fn list_workouts(&self, user_id: UserId) -> WorkoutResult<Vec<WorkoutEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {WORKOUT_COLUMNS}
            FROM logged_workouts
            WHERE user_id = $1
            ORDER BY workout_date DESC, created_at DESC, workout_id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Fetch a single workout
    pub async fn get_workout(&self, workout_id: WorkoutId) -> WorkoutResult<WorkoutEntry> {
        let row = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM logged_workouts WHERE workout_id = $1"
        ))
        .bind(workout_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(WorkoutError::WorkoutNotFound(workout_id))?;

        Ok(entry_from_row(&row))
    }

    /// Replace the mutable fields of a workout
    ///
    /// Owner and counters are untouched.
    ///
    /// # Errors
    ///
    /// * `WorkoutError::WorkoutNotFound` - No workout with that id
    pub async fn update_workout(
        &self,
        workout_id: WorkoutId,
        update: WorkoutUpdate,
    ) -> WorkoutResult<()> {
        validate_fields(
            &update.exercise_name,
            update.sets,
            update.reps,
            update.weight,
            update.duration,
            update.notes.as_deref(),
        )?;

        let result = sqlx::query(
            r#"
            UPDATE logged_workouts
            SET exercise_name = $1,
                sets = $2,
                reps = $3,
                weight = $4,
                duration = $5,
                difficulty = $6,
                notes = $7
            WHERE workout_id = $8
            "#,
        )
        .bind(update.exercise_name.trim())
        .bind(update.sets)
        .bind(update.reps)
        .bind(update.weight)
        .bind(update.duration)
        .bind(update.difficulty.map(|d| d.to_string()))
        .bind(&update.notes)
        .bind(workout_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(WorkoutError::WorkoutNotFound(workout_id));
        }

        Ok(())
    }

    /// Delete a workout and decrement the owner's counters
    ///
    /// # Returns
    ///
    /// * `WorkoutResult<LedgerTotals>` - Owner counters after the delete
    ///
    /// # Errors
    ///
    /// * `WorkoutError::WorkoutNotFound` - No workout with that id
    pub async fn delete_workout(&self, workout_id: WorkoutId) -> WorkoutResult<LedgerTotals> {
        let mut tx = self.pool.begin().await?;

        let user_id: UserId = sqlx::query(
            "DELETE FROM logged_workouts WHERE workout_id = $1 RETURNING user_id",
        )
        .bind(workout_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WorkoutError::WorkoutNotFound(workout_id))?
        .get("user_id");

        let total_workouts: i32 = sqlx::query(
            "UPDATE users SET total_workouts = total_workouts - 1 WHERE user_id = $1 RETURNING total_workouts",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?
        .get("total_workouts");

        let streak = refresh_streak(&mut tx, user_id).await?;

        tx.commit().await?;

        log::info!(
            "Deleted workout {workout_id} of user {user_id} (total_workouts={total_workouts}, streak={streak})"
        );

        Ok(LedgerTotals {
            total_workouts,
            streak,
        })
    }
}

/// Recompute the owner's streak from their workout dates inside `tx`
async fn refresh_streak(tx: &mut Transaction<'_, Postgres>, user_id: UserId) -> WorkoutResult<i32> {
    let dates: Vec<NaiveDate> =
        sqlx::query_scalar("SELECT DISTINCT workout_date FROM logged_workouts WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&mut **tx)
            .await?;

    let streak = compute_streak(&dates);

    sqlx::query("UPDATE users SET streak = $1 WHERE user_id = $2")
        .bind(streak)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    Ok(streak)
}

pub(crate) fn entry_from_row(row: &PgRow) -> WorkoutEntry {
    WorkoutEntry {
        workout_id: row.get("workout_id"),
        user_id: row.get("user_id"),
        exercise_name: row.get("exercise_name"),
        sets: row.get("sets"),
        reps: row.get("reps"),
        weight: row.get("weight"),
        duration: row.get("duration"),
        difficulty: row
            .get::<Option<String>, _>("difficulty")
            .and_then(|d| d.parse().ok()),
        workout_date: row.get("workout_date"),
        workout_time: row.get("workout_time"),
        notes: row.get("notes"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

/// Check the value constraints shared by inserts and edits
pub(crate) fn validate_fields(
    exercise_name: &str,
    sets: i32,
    reps: i32,
    weight: f64,
    duration: i32,
    notes: Option<&str>,
) -> WorkoutResult<()> {
    if exercise_name.trim().is_empty() {
        return Err(WorkoutError::MissingExerciseName);
    }
    if has_nul(exercise_name) {
        return Err(WorkoutError::NulInText("Exercise name"));
    }
    if notes.is_some_and(has_nul) {
        return Err(WorkoutError::NulInText("Notes"));
    }
    if sets <= 0 {
        return Err(WorkoutError::InvalidSets(sets));
    }
    if reps <= 0 {
        return Err(WorkoutError::InvalidReps(reps));
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err(WorkoutError::InvalidWeight(weight));
    }
    if duration < 0 {
        return Err(WorkoutError::InvalidDuration(duration));
    }
    Ok(())
}

/// Blank times become `None`; anything else must parse as `HH:MM[:SS]`
pub(crate) fn normalize_workout_time(time: Option<&str>) -> WorkoutResult<Option<String>> {
    let Some(time) = time.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    if has_nul(time) {
        return Err(WorkoutError::NulInText("Workout time"));
    }

    let valid = NaiveTime::parse_from_str(time, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok();
    if !valid {
        return Err(WorkoutError::InvalidWorkoutTime(time.to_string()));
    }

    Ok(Some(time.to_string()))
}
