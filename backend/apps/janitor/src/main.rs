//! Token Janitor Entry Point
//!
//! Runs migrations, then removes expired verification and password reset
//! tokens. Runs once by default; set `JANITOR_INTERVAL_SECS` to keep
//! sweeping on a fixed interval.
//! Uses `anyhow` for startup errors, but purge failures are reported
//! through `kernel::error::AppError` and never abort the process.

use std::env;
use std::time::Duration;

use auth::{AuthConfig, PgAuthRepository, StorageStrategy, TokenKind};
use kernel::error::app_error::AppError;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "janitor=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::from_lookup(|key| env::var(key).ok())?;

    // Database connection
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let store = PgAuthRepository::new(pool);

    let interval = parse_interval(env::var("JANITOR_INTERVAL_SECS").ok().as_deref())?;

    let Some(period) = interval else {
        sweep(&store, config.token_storage).await;
        return Ok(());
    };

    tracing::info!(interval_secs = period.as_secs(), strategy = ?config.token_storage, "Janitor started");

    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => sweep(&store, config.token_storage).await,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

/// Sweep period from `JANITOR_INTERVAL_SECS`; `None` means a single sweep
fn parse_interval(raw: Option<&str>) -> anyhow::Result<Option<Duration>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("JANITOR_INTERVAL_SECS: {e}"))?;
    if secs == 0 {
        anyhow::bail!("JANITOR_INTERVAL_SECS must be greater than zero");
    }

    Ok(Some(Duration::from_secs(secs)))
}

/// Purge every token kind. Failures are logged and the next kind still runs.
async fn sweep(store: &PgAuthRepository, strategy: StorageStrategy) {
    let mut total = 0u64;

    for kind in TokenKind::ALL {
        match store.purge_expired(strategy, kind).await {
            Ok(purged) => total += purged,
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!(
                    kind = %kind,
                    error_kind = err.kind().as_str(),
                    error = %err,
                    "Token cleanup failed, continuing anyway"
                );
            }
        }
    }

    tracing::info!(tokens_deleted = total, "Token cleanup completed");
}
