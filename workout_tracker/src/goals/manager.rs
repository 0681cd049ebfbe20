//! Goal manager implementation.

use super::{
    errors::{GoalError, GoalResult},
    models::{Completion, Goal, GoalId, NewGoal, ProgressUpdate},
};
use crate::auth::UserId;
use crate::errors::{has_nul, is_foreign_key_violation};
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

/// Goal manager
#[derive(Clone)]
pub struct GoalManager {
    pool: Arc<PgPool>,
}

impl GoalManager {
    /// Create a new goal manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a goal with zero progress
    ///
    /// # Errors
    ///
    /// * `GoalError::MissingName` - Name blank
    /// * `GoalError::NulInName` - Name holds a NUL character
    /// * `GoalError::InvalidTarget` - Target not positive
    /// * `GoalError::UserNotFound` - Owner does not exist
    pub async fn create_goal(&self, goal: NewGoal) -> GoalResult<GoalId> {
        let name = validate_new_goal(&goal)?;

        let row = sqlx::query(
            r#"
            INSERT INTO goals (user_id, goal_name, target_value, deadline)
            VALUES ($1, $2, $3, $4)
            RETURNING goal_id
            "#,
        )
        .bind(goal.user_id)
        .bind(name)
        .bind(goal.target_value)
        .bind(goal.deadline)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                GoalError::UserNotFound(goal.user_id)
            } else {
                GoalError::Database(e)
            }
        })?;

        Ok(row.get("goal_id"))
    }

    /// List a user's goals: open first, then by deadline (none last), then newest
    pub async fn list_goals(&self, user_id: UserId) -> GoalResult<Vec<Goal>> {
        let rows = sqlx::query(
            r#"
            SELECT goal_id, user_id, goal_name, target_value, current_progress, deadline,
                   is_completed, completed_date, created_at
            FROM goals
            WHERE user_id = $1
            ORDER BY is_completed ASC, deadline ASC NULLS LAST, created_at DESC, goal_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(goal_from_row).collect())
    }

    /// Set a goal's progress and recompute its completion
    ///
    /// # Errors
    ///
    /// * `GoalError::NegativeProgress` - Progress below zero
    /// * `GoalError::GoalNotFound` - No goal with that id
    pub async fn update_progress(
        &self,
        goal_id: GoalId,
        progress: i32,
    ) -> GoalResult<ProgressUpdate> {
        self.update_progress_on(goal_id, progress, Utc::now().date_naive())
            .await
    }

    /// [`update_progress`](Self::update_progress) with an explicit completion date
    pub async fn update_progress_on(
        &self,
        goal_id: GoalId,
        progress: i32,
        today: NaiveDate,
    ) -> GoalResult<ProgressUpdate> {
        if progress < 0 {
            return Err(GoalError::NegativeProgress(progress));
        }

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT target_value, is_completed, completed_date FROM goals WHERE goal_id = $1 FOR UPDATE",
        )
        .bind(goal_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(GoalError::GoalNotFound(goal_id))?;

        let target: i32 = row.get("target_value");
        let previous = Completion {
            is_completed: row.get("is_completed"),
            completed_date: row.get("completed_date"),
        };
        let next = previous.after_progress(target, progress, today);

        sqlx::query(
            r#"
            UPDATE goals
            SET current_progress = $1,
                is_completed = $2,
                completed_date = $3
            WHERE goal_id = $4
            "#,
        )
        .bind(progress)
        .bind(next.is_completed)
        .bind(next.completed_date)
        .bind(goal_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let newly_completed = previous.newly_completed(next);
        if newly_completed {
            log::info!("Goal {goal_id} completed on {today}");
        }

        Ok(ProgressUpdate {
            goal_id,
            current_progress: progress,
            is_completed: next.is_completed,
            completed_date: next.completed_date,
            newly_completed,
        })
    }

    /// Delete a goal
    ///
    /// # Errors
    ///
    /// * `GoalError::GoalNotFound` - No goal with that id
    pub async fn delete_goal(&self, goal_id: GoalId) -> GoalResult<()> {
        let result = sqlx::query("DELETE FROM goals WHERE goal_id = $1")
            .bind(goal_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(GoalError::GoalNotFound(goal_id));
        }

        Ok(())
    }
}

fn goal_from_row(row: &PgRow) -> Goal {
    Goal {
        goal_id: row.get("goal_id"),
        user_id: row.get("user_id"),
        goal_name: row.get("goal_name"),
        target_value: row.get("target_value"),
        current_progress: row.get("current_progress"),
        deadline: row.get("deadline"),
        is_completed: row.get("is_completed"),
        completed_date: row.get("completed_date"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

/// Check a new goal and return its trimmed name
fn validate_new_goal(goal: &NewGoal) -> GoalResult<&str> {
    let name = goal.goal_name.trim();
    if name.is_empty() {
        return Err(GoalError::MissingName);
    }
    if has_nul(name) {
        return Err(GoalError::NulInName);
    }
    if goal.target_value <= 0 {
        return Err(GoalError::InvalidTarget(goal.target_value));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_goal(name: &str, target: i32) -> NewGoal {
        NewGoal {
            user_id: 1,
            goal_name: name.to_string(),
            target_value: target,
            deadline: None,
        }
    }

    #[test]
    fn test_validate_new_goal() {
        assert_eq!(validate_new_goal(&new_goal("  500 Squats ", 500)).unwrap(), "500 Squats");
        assert!(matches!(
            validate_new_goal(&new_goal("   ", 500)),
            Err(GoalError::MissingName)
        ));
        assert!(matches!(
            validate_new_goal(&new_goal("Run", 0)),
            Err(GoalError::InvalidTarget(0))
        ));
    }

    #[test]
    fn test_nul_in_goal_name_is_rejected() {
        assert!(matches!(
            validate_new_goal(&new_goal("500\u{0}Squats", 500)),
            Err(GoalError::NulInName)
        ));
    }
}
