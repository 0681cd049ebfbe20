//! Demo account seeding.

use crate::auth::{AuthManager, AuthResult, UserId};
use crate::workouts::{Difficulty, compute_streak};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

/// Email of the demo account
pub const DEMO_EMAIL: &str = "demo@workout.com";

/// Password of the demo account
pub const DEMO_PASSWORD: &str = "Demo123!";

const DEMO_USERNAME: &str = "DemoUser";
const DEMO_FULL_NAME: &str = "Demo User";

struct DemoWorkout {
    exercise_name: &'static str,
    sets: i32,
    reps: i32,
    weight: f64,
    duration: i32,
    difficulty: Difficulty,
    date: (i32, u32, u32),
    time: &'static str,
}

const DEMO_WORKOUTS: [DemoWorkout; 5] = [
    DemoWorkout {
        exercise_name: "Push-ups",
        sets: 3,
        reps: 20,
        weight: 0.0,
        duration: 15,
        difficulty: Difficulty::Moderate,
        date: (2025, 11, 10),
        time: "07:30",
    },
    DemoWorkout {
        exercise_name: "Squats",
        sets: 4,
        reps: 15,
        weight: 135.0,
        duration: 20,
        difficulty: Difficulty::Hard,
        date: (2025, 11, 11),
        time: "18:00",
    },
    DemoWorkout {
        exercise_name: "Bench Press",
        sets: 5,
        reps: 10,
        weight: 185.0,
        duration: 30,
        difficulty: Difficulty::Hard,
        date: (2025, 11, 12),
        time: "12:00",
    },
    DemoWorkout {
        exercise_name: "Pull-ups",
        sets: 3,
        reps: 12,
        weight: 0.0,
        duration: 18,
        difficulty: Difficulty::Moderate,
        date: (2025, 11, 12),
        time: "12:30",
    },
    DemoWorkout {
        exercise_name: "Deadlift",
        sets: 4,
        reps: 8,
        weight: 225.0,
        duration: 25,
        difficulty: Difficulty::Extreme,
        date: (2025, 11, 13),
        time: "17:00",
    },
];

// (name, target, progress, deadline, completed on)
type DemoGoal = (&'static str, i32, i32, (i32, u32, u32), Option<(i32, u32, u32)>);

const DEMO_GOALS: [DemoGoal; 3] = [
    ("1000 Push-ups", 1000, 1000, (2025, 11, 15), Some((2025, 11, 15))),
    ("500 Squats", 500, 350, (2025, 12, 1), None),
    ("100 Pull-ups", 100, 45, (2025, 11, 30), None),
];

/// Result of a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Demo account and its data were inserted
    Created { user_id: UserId },
    /// An account with the demo email already exists; nothing was written
    AlreadyPresent,
}

fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Insert the demo account with five workouts and three goals
///
/// Runs in a single transaction, so a failed run leaves nothing behind.
/// Counters on the account are consistent with the inserted workouts.
pub async fn seed_demo_data(auth: &AuthManager, pool: &PgPool) -> AuthResult<SeedOutcome> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(DEMO_EMAIL)
        .fetch_one(pool)
        .await?;
    if exists {
        log::info!("Demo account already present, skipping seed");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password_hash = auth.hash_password(DEMO_PASSWORD)?;
    let dates: Vec<NaiveDate> = DEMO_WORKOUTS.iter().map(|w| ymd(w.date)).collect();
    let streak = compute_streak(&dates);

    let mut tx = pool.begin().await?;

    let user_id: UserId = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, full_name, streak, total_workouts)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING user_id
        "#,
    )
    .bind(DEMO_USERNAME)
    .bind(DEMO_EMAIL)
    .bind(&password_hash)
    .bind(DEMO_FULL_NAME)
    .bind(streak)
    .bind(DEMO_WORKOUTS.len() as i32)
    .fetch_one(&mut *tx)
    .await?
    .get("user_id");

    for workout in &DEMO_WORKOUTS {
        sqlx::query(
            r#"
            INSERT INTO logged_workouts
                (user_id, exercise_name, sets, reps, weight, duration, difficulty, workout_date, workout_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user_id)
        .bind(workout.exercise_name)
        .bind(workout.sets)
        .bind(workout.reps)
        .bind(workout.weight)
        .bind(workout.duration)
        .bind(workout.difficulty.to_string())
        .bind(ymd(workout.date))
        .bind(workout.time)
        .execute(&mut *tx)
        .await?;
    }

    for (name, target, progress, deadline, completed_on) in DEMO_GOALS {
        sqlx::query(
            r#"
            INSERT INTO goals
                (user_id, goal_name, target_value, current_progress, deadline, is_completed, completed_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(target)
        .bind(progress)
        .bind(ymd(deadline))
        .bind(completed_on.is_some())
        .bind(completed_on.map(ymd))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    log::info!("Seeded demo account {user_id} ({DEMO_EMAIL})");

    Ok(SeedOutcome::Created { user_id })
}
