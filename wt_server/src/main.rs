//! Workout tracker REST server.
//!
//! Connects to PostgreSQL, applies migrations, optionally seeds the demo
//! account and serves the JSON API until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use chrono::Duration;
use pico_args::Arguments;
use tracing::{info, warn};
use workout_tracker::{
    auth::AuthManager,
    db::{DEMO_EMAIL, Database, SeedOutcome, seed_demo_data},
};
use wt_server::{
    api,
    config::ServerConfig,
    logging, metrics,
};

const HELP: &str = "\
Run the workout tracker REST server

USAGE:
  wt_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  --seed-demo              Create the demo account if it does not exist
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:3000)
  DATABASE_URL             PostgreSQL connection string
  JWT_SECRET               JWT signing secret (required, 32+ chars)
  PASSWORD_PEPPER          Password hashing pepper (required, 16+ chars)
  ACCESS_TOKEN_HOURS       Access token lifetime [default: 24]
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  SEED_DEMO                Same as --seed-demo when true
  RUST_LOG                 Log filter
";

struct Args {
    bind: Option<SocketAddr>,
    database_url: Option<String>,
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        seed_demo: pargs.contains("--seed-demo"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}");
    }

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.database_url, args.seed_demo)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(anyhow::Error::msg)?;
        info!("Prometheus metrics exposed at http://{addr}/metrics");
    }

    info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to apply migrations")?;
    info!("Database connected successfully");

    let pool = Arc::new(db.pool().clone());
    let auth_manager = AuthManager::new(
        pool.clone(),
        config.security.password_pepper.clone(),
        config.security.jwt_secret.clone(),
    )
    .with_access_token_duration(Duration::hours(config.security.access_token_hours));

    if config.seed_demo {
        match seed_demo_data(&auth_manager, db.pool()).await {
            Ok(SeedOutcome::Created { user_id }) => {
                info!("Demo account {DEMO_EMAIL} created with id {user_id}")
            }
            Ok(SeedOutcome::AlreadyPresent) => info!("Demo account {DEMO_EMAIL} already exists"),
            Err(e) => warn!("Demo seeding failed: {e}"),
        }
    }

    let app = api::create_router(api::AppState::new(pool, auth_manager));

    let bind = config.bind;
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {bind}"))?;

    info!("Server is running at http://{bind}. Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    db.close().await;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
