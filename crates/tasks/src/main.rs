//! Offline slug maintenance: `generate-slugs [--force]`.
//!
//! Assigns slugs to contributions that lack one, or regenerates every slug
//! with `--force`. Runs outside the request path; each row is saved
//! independently and a failure on one row does not abort the pass. Output
//! is informational only and the process always exits 0.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ucampus_db::repositories::ContributionRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "generate_slugs=info,ucampus_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let force = std::env::args().any(|arg| arg == "--force");

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL must be set");
            return;
        }
    };

    let pool = match ucampus_db::create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "Failed to connect to database");
            return;
        }
    };

    tracing::info!(force, "Starting slug backfill");

    match ContributionRepo::backfill_slugs(&pool, force).await {
        Ok(report) => {
            tracing::info!(
                assigned = report.assigned,
                skipped = report.skipped,
                failed = report.failed,
                "Slug backfill complete"
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "Slug backfill aborted");
        }
    }
}
