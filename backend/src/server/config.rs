//! HTTP server configuration object and startup settings.

use std::net::{AddrParseError, SocketAddr};

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup settings loaded via OrthoConfig.
///
/// Values merge from defaults, an optional configuration file, `CLINIC_*`
/// environment variables, and command-line arguments.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLINIC")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; fixture ports serve requests when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub db_pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a valid
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses Diesel-backed implementations for every
    /// port with an adapter; otherwise fixture ports serve the API.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
