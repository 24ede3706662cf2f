//! Driving port for account lifecycle use-cases.
//!
//! Inbound adapters call this port to register, sign in and sign out without
//! importing the credential store or session persistence.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, Session, SignupDetails, User};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user: User,
    pub session: Session,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a non-admin account.
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error>;

    /// Verify credentials and open a session.
    async fn signin(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error>;

    /// Revoke the session behind `token` and return its owner.
    async fn signout(&self, token: &AccessToken) -> Result<User, Error>;

    /// Owner of the active session behind `token`.
    ///
    /// Fails with ATHR-001 or ATHR-002 exactly as the content use-cases do.
    async fn authenticate(&self, token: &AccessToken) -> Result<User, Error>;
}
