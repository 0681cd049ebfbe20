//! Analytics manager implementation.

use super::{
    errors::AnalyticsResult,
    models::{ExerciseBreakdown, UserWorkoutRow, WorkoutStats},
};
use crate::auth::UserId;
use crate::db::timeouts::{AGGREGATE_QUERY_TIMEOUT, with_default_timeout, with_timeout};
use crate::workouts::{WorkoutEntry, manager::WORKOUT_COLUMNS, manager::entry_from_row};
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Maximum number of exercises in a breakdown
pub const BREAKDOWN_LIMIT: i64 = 10;

/// Number of distinct workout dates covered by the recent-workouts view
pub const RECENT_DATE_WINDOW: i64 = 5;

/// Analytics manager
#[derive(Clone)]
pub struct AnalyticsManager {
    pool: Arc<PgPool>,
}

impl AnalyticsManager {
    /// Create a new analytics manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Totals over every workout the user owns
    pub async fn get_stats(&self, user_id: UserId) -> AnalyticsResult<WorkoutStats> {
        let row = with_timeout(
            AGGREGATE_QUERY_TIMEOUT,
            sqlx::query(
                r#"
                SELECT
                    COUNT(*) AS total_workouts,
                    COALESCE(SUM(sets::BIGINT * reps), 0)::BIGINT AS total_reps,
                    COALESCE(SUM(weight), 0)::DOUBLE PRECISION AS total_weight,
                    COALESCE(SUM(duration), 0)::BIGINT AS total_duration,
                    AVG(duration)::DOUBLE PRECISION AS avg_duration,
                    MAX(weight) AS max_weight
                FROM logged_workouts
                WHERE user_id = $1
                "#,
            )
            .bind(user_id)
            .fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(WorkoutStats {
            total_workouts: row.get("total_workouts"),
            total_reps: row.get("total_reps"),
            total_weight: row.get("total_weight"),
            total_duration: row.get("total_duration"),
            avg_duration: row.get("avg_duration"),
            max_weight: row.get("max_weight"),
        })
    }

    /// Most frequent exercises, at most [`BREAKDOWN_LIMIT`]
    ///
    /// Exercises with equal session counts come back in name order; callers
    /// should not rely on that.
    pub async fn get_exercise_breakdown(
        &self,
        user_id: UserId,
    ) -> AnalyticsResult<Vec<ExerciseBreakdown>> {
        let rows = with_timeout(
            AGGREGATE_QUERY_TIMEOUT,
            sqlx::query(
                r#"
                SELECT
                    exercise_name,
                    COUNT(*) AS session_count,
                    SUM(sets::BIGINT * reps)::BIGINT AS total_reps,
                    AVG(weight)::DOUBLE PRECISION AS avg_weight,
                    MAX(weight) AS max_weight
                FROM logged_workouts
                WHERE user_id = $1
                GROUP BY exercise_name
                ORDER BY session_count DESC, exercise_name ASC
                LIMIT $2
                "#,
            )
            .bind(user_id)
            .bind(BREAKDOWN_LIMIT)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows
            .iter()
            .map(|row| ExerciseBreakdown {
                exercise_name: row.get("exercise_name"),
                session_count: row.get("session_count"),
                total_reps: row.get("total_reps"),
                avg_weight: row.get("avg_weight"),
                max_weight: row.get("max_weight"),
            })
            .collect())
    }

    /// Every workout on the user's [`RECENT_DATE_WINDOW`] most recent workout dates
    pub async fn get_recent_workouts(&self, user_id: UserId) -> AnalyticsResult<Vec<WorkoutEntry>> {
        let sql = format!(
            r#"
            SELECT {WORKOUT_COLUMNS}
            FROM logged_workouts
            WHERE user_id = $1
              AND workout_date IN (
                  SELECT DISTINCT workout_date
                  FROM logged_workouts
                  WHERE user_id = $1
                  ORDER BY workout_date DESC
                  LIMIT $2
              )
            ORDER BY workout_date DESC, created_at DESC, workout_id DESC
            "#
        );

        let rows = with_default_timeout(
            sqlx::query(&sql)
                .bind(user_id)
                .bind(RECENT_DATE_WINDOW)
                .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// One row per workout carrying the owner's profile fields
    ///
    /// Empty when the user has no workouts, whether or not the user exists.
    pub async fn get_user_with_workouts(
        &self,
        user_id: UserId,
    ) -> AnalyticsResult<Vec<UserWorkoutRow>> {
        let rows = with_default_timeout(
            sqlx::query(
                r#"
                SELECT
                    u.user_id, u.username, u.email, u.full_name, u.streak, u.total_workouts,
                    w.workout_id, w.exercise_name, w.sets, w.reps, w.weight, w.duration,
                    w.difficulty, w.workout_date, w.notes
                FROM users u
                INNER JOIN logged_workouts w ON u.user_id = w.user_id
                WHERE u.user_id = $1
                ORDER BY w.workout_date DESC, w.created_at DESC, w.workout_id DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows
            .iter()
            .map(|row| UserWorkoutRow {
                user_id: row.get("user_id"),
                username: row.get("username"),
                email: row.get("email"),
                full_name: row.get("full_name"),
                streak: row.get("streak"),
                total_workouts: row.get("total_workouts"),
                workout_id: row.get("workout_id"),
                exercise_name: row.get("exercise_name"),
                sets: row.get("sets"),
                reps: row.get("reps"),
                weight: row.get("weight"),
                duration: row.get("duration"),
                difficulty: row
                    .get::<Option<String>, _>("difficulty")
                    .and_then(|d| d.parse().ok()),
                workout_date: row.get("workout_date"),
                notes: row.get("notes"),
            })
            .collect())
    }
}
