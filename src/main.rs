use std::sync::Arc;

use anyhow::Context;
use posts_api::{Config, Server, posts};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter `{}`", config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let registry = Arc::new(config.registry());
    info!(
        posts = registry.len()?,
        seeded_ids = config.id_seed.is_some(),
        "post registry ready"
    );

    let server = Server::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    server.serve(posts::app(registry)).await?;
    Ok(())
}
