use std::{sync::Arc, time::Duration};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offer_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_read_only_pool, PgProfileRepository, PoolSettings},
    services::generator::{GeneratorSettings, OpenAiGenerator},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offer_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        api_key = %config.masked_api_key(),
        database = %config.database_target(),
        model = %config.openai_model,
        "Configuration loaded"
    );

    let pool = create_read_only_pool(
        &config.database_url,
        &PoolSettings {
            max_connections: config.db_max_connections,
            acquire_timeout: Duration::from_secs(config.db_acquire_timeout_secs),
        },
    )?;

    let generator = OpenAiGenerator::new(GeneratorSettings {
        api_key: config.openai_api_key.clone(),
        api_url: config.openai_api_url.clone(),
        model: config.openai_model.clone(),
        temperature: config.openai_temperature,
        timeout: Duration::from_secs(config.openai_timeout_secs),
    })?;

    let state = AppState::new(
        Arc::new(PgProfileRepository::new(pool)),
        Arc::new(generator),
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
