//! Integration tests for workout analytics.
//!
//! Uses `DATABASE_URL`, falling back to a local `workout_test` database.

use chrono::NaiveDate;
use std::sync::Arc;
use workout_tracker::analytics::{AnalyticsManager, BREAKDOWN_LIMIT};
use workout_tracker::auth::{AuthManager, RegisterRequest, UserId};
use workout_tracker::db::{Database, DatabaseConfig};
use workout_tracker::workouts::{NewWorkout, WorkoutManager};

struct Harness {
    auth: AuthManager,
    workouts: WorkoutManager,
    analytics: AnalyticsManager,
}

impl Harness {
    async fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://postgres@localhost/workout_test".to_string());

        let db = Database::new(&DatabaseConfig::development().with_url(database_url))
            .await
            .expect("Failed to create test database");
        db.migrate().await.expect("Migrations failed");
        let pool = Arc::new(db.pool().clone());

        Self {
            auth: AuthManager::new(
                pool.clone(),
                "test_pepper_value".to_string(),
                "test_jwt_secret_that_is_long_enough".to_string(),
            ),
            workouts: WorkoutManager::new(pool.clone()),
            analytics: AnalyticsManager::new(pool),
        }
    }

    async fn user(&self) -> UserId {
        let suffix: u32 = rand::random();
        self.auth
            .register(RegisterRequest {
                username: format!("stats{suffix}"),
                email: format!("stats{suffix}@example.com"),
                password: "Strong123".to_string(),
                full_name: Some("Stats Tester".to_string()),
            })
            .await
            .expect("Registration should succeed")
    }

    async fn log(
        &self,
        user_id: UserId,
        name: &str,
        sets: i32,
        reps: i32,
        weight: f64,
        duration: i32,
        on: &str,
    ) -> i64 {
        self.workouts
            .log_workout(NewWorkout {
                user_id,
                exercise_name: name.to_string(),
                sets,
                reps,
                weight,
                duration,
                difficulty: None,
                workout_date: NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap(),
                workout_time: None,
                notes: None,
            })
            .await
            .expect("Logging should succeed")
    }
}

#[tokio::test]
async fn test_stats_for_user_without_workouts() {
    let h = Harness::new().await;
    let user_id = h.user().await;

    let stats = h.analytics.get_stats(user_id).await.unwrap();
    assert_eq!(stats.total_workouts, 0);
    assert_eq!(stats.total_reps, 0);
    assert_eq!(stats.total_weight, 0.0);
    assert_eq!(stats.total_duration, 0);
    assert_eq!(stats.avg_duration, None);
    assert_eq!(stats.max_weight, None);

    assert!(h.analytics.get_exercise_breakdown(user_id).await.unwrap().is_empty());
    assert!(h.analytics.get_recent_workouts(user_id).await.unwrap().is_empty());
    assert!(h.analytics.get_user_with_workouts(user_id).await.unwrap().is_empty());

    h.auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_stats_scenario() {
    let h = Harness::new().await;
    let user_id = h.user().await;

    h.log(user_id, "Squats", 4, 15, 135.0, 20, "2025-10-20").await;
    h.log(user_id, "Push-ups", 3, 20, 0.0, 15, "2025-10-21").await;

    let stats = h.analytics.get_stats(user_id).await.unwrap();
    assert_eq!(stats.total_workouts, 2);
    assert_eq!(stats.total_reps, 120);
    assert_eq!(stats.total_weight, 135.0);
    assert_eq!(stats.total_duration, 35);
    assert_eq!(stats.avg_duration, Some(17.5));
    assert_eq!(stats.max_weight, Some(135.0));

    h.auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_breakdown_groups_and_limits() {
    let h = Harness::new().await;
    let user_id = h.user().await;

    h.log(user_id, "Bench", 5, 5, 100.0, 20, "2025-10-20").await;
    h.log(user_id, "Bench", 5, 5, 120.0, 20, "2025-10-21").await;
    for i in 0..BREAKDOWN_LIMIT {
        h.log(user_id, &format!("Accessory {i:02}"), 3, 10, 10.0, 5, "2025-10-21")
            .await;
    }

    let breakdown = h.analytics.get_exercise_breakdown(user_id).await.unwrap();
    assert_eq!(breakdown.len() as i64, BREAKDOWN_LIMIT);

    let bench = &breakdown[0];
    assert_eq!(bench.exercise_name, "Bench");
    assert_eq!(bench.session_count, 2);
    assert_eq!(bench.total_reps, 50);
    assert_eq!(bench.avg_weight, 110.0);
    assert_eq!(bench.max_weight, 120.0);

    h.auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_recent_workouts_cover_five_dates() {
    let h = Harness::new().await;
    let user_id = h.user().await;

    for day in 10..=16 {
        h.log(user_id, "Run", 1, 1, 0.0, 30, &format!("2025-10-{day}"))
            .await;
    }
    // Second entry on the newest date
    h.log(user_id, "Stretch", 1, 1, 0.0, 10, "2025-10-16").await;

    let recent = h.analytics.get_recent_workouts(user_id).await.unwrap();
    assert_eq!(recent.len(), 6);
    assert_eq!(recent[0].exercise_name, "Stretch");
    let oldest = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
    assert!(recent.iter().all(|w| w.workout_date >= oldest));
    assert!(
        recent
            .windows(2)
            .all(|pair| pair[0].workout_date >= pair[1].workout_date)
    );

    h.auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_analytics_are_isolated_per_user() {
    let h = Harness::new().await;
    let alice = h.user().await;
    let bob = h.user().await;

    h.log(alice, "Squats", 4, 15, 135.0, 20, "2025-10-21").await;
    let bob_workout = h.log(bob, "Rows", 3, 12, 60.0, 15, "2025-10-21").await;

    let stats = h.analytics.get_stats(alice).await.unwrap();
    assert_eq!(stats.total_workouts, 1);
    assert_eq!(stats.total_reps, 60);

    let joined = h.analytics.get_user_with_workouts(bob).await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].user_id, bob);
    assert_eq!(joined[0].workout_id, bob_workout);
    assert_eq!(joined[0].exercise_name, "Rows");
    assert_eq!(joined[0].total_workouts, 1);

    h.auth.delete_user(alice).await.unwrap();
    h.auth.delete_user(bob).await.unwrap();
}
