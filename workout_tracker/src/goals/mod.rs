//! Goal tracking: targets with progress and update-time completion.
//!
//! Completion is a stored value recomputed only by [`GoalManager::update_progress`];
//! it is never derived lazily on read.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{GoalError, GoalResult};
pub use manager::GoalManager;
pub use models::{Completion, Goal, GoalId, NewGoal, ProgressUpdate};
