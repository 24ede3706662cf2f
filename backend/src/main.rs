//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use quora_backend::inbound::http::health::HealthState;
use quora_backend::outbound::persistence::{DbPool, run_migrations};
use quora_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

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
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    info!(
        bind_addr = %config.bind_addr(),
        persistent = config.is_persistent(),
        "starting server"
    );
    let server = create_server(health_state, config).await?;
    server.await
}

/// Translate settings into a server configuration, preparing the database
/// when one is configured.
async fn build_server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let admin = settings
        .admin_details()
        .map_err(|err| std::io::Error::other(format!("invalid administrator settings: {err}")))?;
    let config = ServerConfig::new(settings.bind_addr())
        .with_session_policy(settings.session_policy())
        .with_admin(admin);

    let Some(pool_config) = settings.pool_config() else {
        warn!("no database configured; state is kept in memory");
        return Ok(config);
    };
    run_migrations(pool_config.database_url())
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}

#[cfg(test)]
mod tests;
