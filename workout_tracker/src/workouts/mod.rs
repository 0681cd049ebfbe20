//! Workout ledger: logging, listing, editing and deleting workout entries.
//!
//! Every insert and delete is one transaction that also adjusts the owner's
//! `total_workouts` counter by exactly one and recomputes their streak, so
//! the counter always equals the number of entries the user owns.
//!
//! ## Example
//!
//! ```no_run
//! use workout_tracker::workouts::{Difficulty, NewWorkout, WorkoutManager};
//! use workout_tracker::db::Database;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let workouts = WorkoutManager::new(Arc::new(db.pool().clone()));
//!
//!     let workout_id = workouts
//!         .log_workout(NewWorkout {
//!             user_id: 1,
//!             exercise_name: "Squats".to_string(),
//!             sets: 4,
//!             reps: 15,
//!             weight: 135.0,
//!             duration: 20,
//!             difficulty: Some(Difficulty::Hard),
//!             workout_date: NaiveDate::from_ymd_opt(2025, 10, 21).unwrap(),
//!             workout_time: Some("18:00".to_string()),
//!             notes: None,
//!         })
//!         .await?;
//!     println!("Logged workout {workout_id}");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod streak;

pub use errors::{WorkoutError, WorkoutResult};
pub use manager::WorkoutManager;
pub use models::{Difficulty, LedgerTotals, NewWorkout, WorkoutEntry, WorkoutId, WorkoutUpdate};
pub use streak::compute_streak;
