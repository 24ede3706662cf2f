//! Async connection pool shared by the Diesel repositories.
//!
//! Wraps `diesel-async` and `bb8`. Checkout failures surface as
//! [`PoolError`] and each repository maps them onto its port's `connection`
//! error.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

/// Connections kept open when no size is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Idle connections kept warm when no value is configured.
pub const DEFAULT_MIN_IDLE: u32 = 2;
/// Checkout timeout when no value is configured.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available before the checkout timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be created from its configuration.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Sizing and timeout for the PostgreSQL pool.
///
/// Built from `AppSettings::pool_config`; unset values fall back to the
/// `DEFAULT_*` constants in this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    min_idle: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_idle: DEFAULT_MIN_IDLE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub fn with_min_idle(mut self, min_idle: u32) -> Self {
        self.min_idle = min_idle;
        self
    }

    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn min_idle(&self) -> u32 {
        self.min_idle
    }

    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }

    /// Reject sizes bb8 would refuse at build time.
    fn validate(&self) -> Result<(), PoolError> {
        if self.max_connections == 0 {
            return Err(PoolError::build("max connections must be at least 1"));
        }
        if self.min_idle > self.max_connections {
            return Err(PoolError::build(format!(
                "min idle ({}) exceeds max connections ({})",
                self.min_idle, self.max_connections
            )));
        }
        if self.checkout_timeout.is_zero() {
            return Err(PoolError::build("checkout timeout must be positive"));
        }
        Ok(())
    }
}

/// Cloneable handle to the shared pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool and open its idle connections.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the configuration is inconsistent or
    /// the initial connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_idle))
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        debug!(
            max_connections = config.max_connections,
            min_idle = config.min_idle,
            "database pool ready"
        );
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up within the
    /// checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "postgres://localhost/quora";

    #[rstest]
    fn unset_values_use_the_defaults() {
        let config = PoolConfig::new(URL);
        assert_eq!(config.database_url(), URL);
        assert_eq!(config.max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_idle(), DEFAULT_MIN_IDLE);
        assert_eq!(config.checkout_timeout(), DEFAULT_CHECKOUT_TIMEOUT);
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case(PoolConfig::new(URL).with_max_connections(0), "at least 1")]
    #[case(
        PoolConfig::new(URL).with_max_connections(2).with_min_idle(3),
        "exceeds max connections"
    )]
    #[case(
        PoolConfig::new(URL).with_checkout_timeout(Duration::ZERO),
        "must be positive"
    )]
    fn inconsistent_sizes_are_rejected(#[case] config: PoolConfig, #[case] fragment: &str) {
        let err = config.validate().expect_err("config must be rejected");
        assert!(matches!(err, PoolError::Build { .. }));
        assert!(err.to_string().contains(fragment), "{err}");
    }

    #[tokio::test]
    async fn invalid_configs_fail_before_connecting() {
        let err = DbPool::new(PoolConfig::new(URL).with_max_connections(0))
            .await
            .err()
            .expect("pool must not build");
        assert!(matches!(err, PoolError::Build { .. }));
    }

    #[rstest]
    #[case(PoolError::checkout("connection refused"), "connection refused")]
    #[case(PoolError::build("invalid URL"), "invalid URL")]
    fn pool_error_display(#[case] error: PoolError, #[case] fragment: &str) {
        assert!(error.to_string().contains(fragment));
    }
}
