//! Integration tests for goal tracking.
//!
//! Uses `DATABASE_URL`, falling back to a local `workout_test` database.

use chrono::NaiveDate;
use std::sync::Arc;
use workout_tracker::auth::{AuthManager, RegisterRequest, UserId};
use workout_tracker::db::{Database, DatabaseConfig};
use workout_tracker::goals::{GoalError, GoalManager, NewGoal};

async fn setup() -> (AuthManager, GoalManager, UserId) {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/workout_test".to_string());

    let db = Database::new(&DatabaseConfig::development().with_url(database_url))
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Migrations failed");
    let pool = Arc::new(db.pool().clone());

    let auth = AuthManager::new(
        pool.clone(),
        "test_pepper_value".to_string(),
        "test_jwt_secret_that_is_long_enough".to_string(),
    );
    let suffix: u32 = rand::random();
    let user_id = auth
        .register(RegisterRequest {
            username: format!("goals{suffix}"),
            email: format!("goals{suffix}@example.com"),
            password: "Strong123".to_string(),
            full_name: Some("Goal Tester".to_string()),
        })
        .await
        .expect("Registration should succeed");

    (auth, GoalManager::new(pool), user_id)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn goal(user_id: UserId, name: &str, target: i32, deadline: Option<&str>) -> NewGoal {
    NewGoal {
        user_id,
        goal_name: name.to_string(),
        target_value: target,
        deadline: deadline.map(date),
    }
}

#[tokio::test]
async fn test_new_goal_starts_open() {
    let (auth, goals, user_id) = setup().await;

    let goal_id = goals
        .create_goal(goal(user_id, "100 Pull-ups", 100, Some("2025-11-30")))
        .await
        .unwrap();

    let listed = goals.list_goals(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].goal_id, goal_id);
    assert_eq!(listed[0].current_progress, 0);
    assert!(!listed[0].is_completed);
    assert_eq!(listed[0].completed_date, None);

    auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_progress_completes_and_reopens() {
    let (auth, goals, user_id) = setup().await;

    let goal_id = goals
        .create_goal(goal(user_id, "500 Squats", 500, None))
        .await
        .unwrap();

    let partial = goals
        .update_progress_on(goal_id, 350, date("2025-11-20"))
        .await
        .unwrap();
    assert!(!partial.is_completed);
    assert!(!partial.newly_completed);

    let done = goals
        .update_progress_on(goal_id, 500, date("2025-11-21"))
        .await
        .unwrap();
    assert!(done.is_completed);
    assert!(done.newly_completed);
    assert_eq!(done.completed_date, Some(date("2025-11-21")));

    // Staying completed keeps the first completion date
    let beyond = goals
        .update_progress_on(goal_id, 650, date("2025-11-25"))
        .await
        .unwrap();
    assert!(beyond.is_completed);
    assert!(!beyond.newly_completed);
    assert_eq!(beyond.completed_date, Some(date("2025-11-21")));

    let reopened = goals
        .update_progress_on(goal_id, 10, date("2025-11-26"))
        .await
        .unwrap();
    assert!(!reopened.is_completed);
    assert_eq!(reopened.completed_date, None);

    let stored = &goals.list_goals(user_id).await.unwrap()[0];
    assert_eq!(stored.current_progress, 10);
    assert!(!stored.is_completed);

    auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_list_puts_open_goals_first() {
    let (auth, goals, user_id) = setup().await;

    let finished = goals
        .create_goal(goal(user_id, "Done", 1, Some("2025-11-01")))
        .await
        .unwrap();
    goals.update_progress(finished, 1).await.unwrap();
    let undated = goals
        .create_goal(goal(user_id, "Someday", 10, None))
        .await
        .unwrap();
    let later = goals
        .create_goal(goal(user_id, "Later", 10, Some("2025-12-31")))
        .await
        .unwrap();
    let sooner = goals
        .create_goal(goal(user_id, "Sooner", 10, Some("2025-11-15")))
        .await
        .unwrap();

    let ids: Vec<i64> = goals
        .list_goals(user_id)
        .await
        .unwrap()
        .iter()
        .map(|g| g.goal_id)
        .collect();
    assert_eq!(ids, vec![sooner, later, undated, finished]);

    auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_invalid_goals_rejected() {
    let (auth, goals, user_id) = setup().await;

    assert!(matches!(
        goals.create_goal(goal(user_id, "  ", 10, None)).await,
        Err(GoalError::MissingName)
    ));
    assert!(matches!(
        goals.create_goal(goal(user_id, "Zero", 0, None)).await,
        Err(GoalError::InvalidTarget(0))
    ));
    assert!(matches!(
        goals.create_goal(goal(user_id, "Run\u{0}5k", 10, None)).await,
        Err(GoalError::NulInName)
    ));
    assert!(matches!(
        goals.create_goal(goal(i64::MAX, "Orphan", 10, None)).await,
        Err(GoalError::UserNotFound(_))
    ));
    assert!(goals.list_goals(user_id).await.unwrap().is_empty());

    auth.delete_user(user_id).await.unwrap();
}

#[tokio::test]
async fn test_missing_goal_operations() {
    let (auth, goals, user_id) = setup().await;

    assert!(matches!(
        goals.update_progress(i64::MAX, 5).await,
        Err(GoalError::GoalNotFound(_))
    ));
    assert!(matches!(
        goals.delete_goal(i64::MAX).await,
        Err(GoalError::GoalNotFound(_))
    ));

    let goal_id = goals
        .create_goal(goal(user_id, "Temp", 5, None))
        .await
        .unwrap();
    assert!(matches!(
        goals.update_progress(goal_id, -1).await,
        Err(GoalError::NegativeProgress(-1))
    ));
    goals.delete_goal(goal_id).await.unwrap();
    assert!(goals.list_goals(user_id).await.unwrap().is_empty());

    auth.delete_user(user_id).await.unwrap();
}
