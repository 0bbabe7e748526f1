//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use rand::RngCore;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloodbank::inbound::http::health::HealthState;
use bloodbank::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use bloodbank::outbound::security::TokenSigningKey;
use bloodbank::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Use the configured secret, or a random one in debug builds.
fn signing_key(settings: &AppSettings) -> std::io::Result<TokenSigningKey> {
    if let Some(secret) = settings.token_secret() {
        return Ok(TokenSigningKey::new(secret));
    }
    if cfg!(debug_assertions) {
        warn!("BLOODBANK_TOKEN_SECRET not set; using an ephemeral signing key (dev only)");
        let mut bytes = [0_u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        return Ok(TokenSigningKey::new(bytes));
    }
    Err(std::io::Error::other(
        "BLOODBANK_TOKEN_SECRET must be set in release builds",
    ))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, signing_key(&settings)?, token_ttl)
        .with_seed_inventory(settings.seed_inventory());

    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            info!("using PostgreSQL storage");
            config = config.with_db_pool(pool);
        }
        None => warn!("BLOODBANK_DATABASE_URL not set; using in-memory storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await
}
