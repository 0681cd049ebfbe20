//! # Workout Tracker
//!
//! Account management, workout logging, goal tracking and training statistics
//! on top of PostgreSQL.
//!
//! Every user owns their workouts and goals. The per-user `total_workouts`
//! counter and `streak` are denormalized onto the `users` row and are only
//! ever changed in the same transaction as the workout insert or delete that
//! caused the change, so readers never see one without the other.
//!
//! ## Core Modules
//!
//! - [`db`]: Connection pool, configuration, migrations and demo data
//! - [`auth`]: Registration, login, password hashing and access tokens
//! - [`workouts`]: Workout ledger with transactional counter maintenance
//! - [`goals`]: Goals with update-time completion tracking
//! - [`analytics`]: Read-only aggregates over a user's workouts
//!
//! ## Example
//!
//! ```no_run
//! use workout_tracker::db::{Database, DatabaseConfig};
//! use workout_tracker::workouts::WorkoutManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     db.migrate().await?;
//!
//!     let workouts = WorkoutManager::new(Arc::new(db.pool().clone()));
//!     for entry in workouts.list_workouts(1).await? {
//!         println!("{} on {}", entry.exercise_name, entry.workout_date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod auth;
pub mod db;
pub mod errors;
pub mod goals;
pub mod workouts;

pub use errors::ErrorKind;
