//! Backend entry-point: wires configuration, persistence, and the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::fingerprint::key_fingerprint;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;

use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load server settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("invalid session configuration: {e}")))?;
    info!(
        key_fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    match settings.database_url.as_deref() {
        Some(database_url) => {
            let mut pool_config = PoolConfig::new(database_url);
            if let Some(max_size) = settings.db_pool_max_size {
                pool_config = pool_config.with_max_size(max_size);
            }
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("CLINIC_DATABASE_URL not set; serving fixture data without persistence");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
