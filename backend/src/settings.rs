//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `QUORA_*` environment variables and config
//! files, in that order of precedence.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    CredentialsValidationError, DEFAULT_SESSION_TTL, SessionPolicy, SignupDetails, UserProfile,
};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the HTTP server and its backing stores.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QUORA")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without one the process keeps state in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Idle database connections kept open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_checkout_timeout_secs: Option<u64>,
    /// Lifetime stamped on new sessions, in hours.
    pub session_ttl_hours: Option<u32>,
    /// Reject sessions past their expiry time.
    #[ortho_config(default = false)]
    pub enforce_session_expiry: bool,
    /// Bootstrap administrator username.
    pub admin_username: Option<String>,
    /// Bootstrap administrator email address.
    pub admin_email: Option<String>,
    /// Bootstrap administrator password.
    pub admin_password: Option<String>,
}

impl AppSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let database_url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(database_url);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_connections(max);
        }
        if let Some(idle) = self.db_min_idle {
            config = config.with_min_idle(idle);
        }
        if let Some(secs) = self.db_checkout_timeout_secs {
            config = config.with_checkout_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }

    /// Session lifetime rules derived from the TTL and enforcement flag.
    pub fn session_policy(&self) -> SessionPolicy {
        let ttl = self
            .session_ttl_hours
            .map_or(DEFAULT_SESSION_TTL, |hours| TimeDelta::hours(i64::from(hours)));
        SessionPolicy::new(ttl, self.enforce_session_expiry)
    }

    /// Administrator to create at start-up.
    ///
    /// Returns `Ok(None)` unless username, email and password are all set.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsValidationError`] when the configured values fail
    /// signup validation.
    pub fn admin_details(&self) -> Result<Option<SignupDetails>, CredentialsValidationError> {
        let (Some(username), Some(email), Some(password)) = (
            self.admin_username.as_deref(),
            self.admin_email.as_deref(),
            self.admin_password.as_deref(),
        ) else {
            return Ok(None);
        };
        let profile = UserProfile::new(username, "Administrator")?;
        SignupDetails::try_new(username, email, password, profile).map(Some)
    }
}
