//! Seeds the profile tables from a customer fixture.
//!
//! Usage: `seed [path/to/customer_data.json]` (defaults to
//! `fixtures/customer_data.json`). Requires `DATABASE_URL` or `POSTGRES`.

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offer_api::db::{
    create_pool,
    seed::{parse_fixture, seed_customer},
    PoolSettings,
};

const DEFAULT_FIXTURE: &str = "fixtures/customer_data.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,offer_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("POSTGRES"))
        .context("DATABASE_URL or POSTGRES environment variable required")?;

    let fixture_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FIXTURE.to_string());
    let raw = tokio::fs::read_to_string(&fixture_path)
        .await
        .with_context(|| format!("Failed to read fixture {}", fixture_path))?;
    let fixture = parse_fixture(&raw)
        .with_context(|| format!("Failed to parse fixture {}", fixture_path))?;

    let pool = create_pool(
        &database_url,
        &PoolSettings {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        },
    )
    .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    seed_customer(&pool, &fixture).await?;
    pool.close().await;

    Ok(())
}
