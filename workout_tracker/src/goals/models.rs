//! Goal tracking data models.

use crate::auth::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Goal ID type
pub type GoalId = i64;

/// A target a user is progressing toward
///
/// Serialized with the column names of `goals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_id: GoalId,
    pub user_id: UserId,
    pub goal_name: String,
    pub target_value: i32,
    pub current_progress: i32,
    pub deadline: Option<NaiveDate>,
    pub is_completed: bool,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub user_id: UserId,
    pub goal_name: String,
    pub target_value: i32,
    pub deadline: Option<NaiveDate>,
}

/// Stored completion state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub is_completed: bool,
    pub completed_date: Option<NaiveDate>,
}

impl Completion {
    /// Completion state after setting `progress` against `target` on `today`
    ///
    /// The date is stamped on the false -> true transition, kept while the
    /// goal stays complete and cleared when progress drops below target.
    pub fn after_progress(self, target: i32, progress: i32, today: NaiveDate) -> Self {
        let is_completed = progress >= target;
        let completed_date = match (self.is_completed, is_completed) {
            (false, true) => Some(today),
            (true, true) => self.completed_date.or(Some(today)),
            (_, false) => None,
        };

        Self {
            is_completed,
            completed_date,
        }
    }

    /// Whether moving from `self` to `next` completed the goal
    pub fn newly_completed(self, next: Completion) -> bool {
        !self.is_completed && next.is_completed
    }
}

/// Result of a progress update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub goal_id: GoalId,
    pub current_progress: i32,
    pub is_completed: bool,
    pub completed_date: Option<NaiveDate>,
    pub newly_completed: bool,
}
