//! Love Dice Server
//!
//! Loads configuration from the environment, then serves the HTTP API.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use love_dice::{ApiServer, AppContext, AuthConfig, MemoryStore, ServerConfig, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Love Dice Server v{}", VERSION);

    let server_config = ServerConfig::from_env()?;
    let auth_config = AuthConfig::from_env();
    if auth_config.uses_dev_secret() {
        warn!("JWT_SECRET_KEY not set; using the development secret");
    }

    let ctx = Arc::new(AppContext::new(Arc::new(MemoryStore::new()), auth_config));
    ApiServer::new(server_config, ctx).run().await?;

    Ok(())
}
