//! Port for persisting sign-in sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, Session};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session repository query failed: {message}",
    }
}

/// Storage for sessions keyed by their access token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly issued session.
    async fn insert(&self, session: &Session) -> Result<(), SessionPersistenceError>;

    /// Exact-token lookup.
    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Session>, SessionPersistenceError>;

    /// Stamp `logout_at` on the session behind `token` if it is still open.
    ///
    /// The check and the write happen as one step. Returns `false` when the
    /// session was already signed out or does not exist.
    async fn sign_out(
        &self,
        token: &AccessToken,
        at: DateTime<Utc>,
    ) -> Result<bool, SessionPersistenceError>;
}
