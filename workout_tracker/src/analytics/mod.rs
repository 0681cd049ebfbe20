//! Read-only analytics over a user's workout history.
//!
//! Every query is scoped by owner id, so one user's numbers never include
//! another user's entries.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{AnalyticsError, AnalyticsResult};
pub use manager::{AnalyticsManager, BREAKDOWN_LIMIT, RECENT_DATE_WINDOW};
pub use models::{ExerciseBreakdown, UserWorkoutRow, WorkoutStats};
