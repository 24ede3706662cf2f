//! Account lifecycle: signup, sign-in, sign-out and admin bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::auth::{LoginCredentials, SignupDetails};
use super::error::{Error, ReasonCode};
use super::ports::{AccountCommand, PasswordHasher, SignedIn, UserRepository};
use super::repository_errors::{EMAIL_REGISTERED, USERNAME_TAKEN};
use super::session::AccessToken;
use super::session_authority::SessionAuthority;
use super::user::{Role, User, UserId, Username};

const UNKNOWN_USERNAME: &str = "This username does not exist";
const PASSWORD_MISMATCH: &str = "Password failed";

/// Implements [`AccountCommand`] over the credential store.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<SessionAuthority>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<SessionAuthority>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// Make sure an administrator account exists.
    ///
    /// Idempotent: an existing admin with the same username is returned as
    /// is. Roles are never changed, so a non-admin holding the username is a
    /// conflict.
    pub async fn ensure_admin(&self, details: &SignupDetails) -> Result<User, Error> {
        if let Some(existing) = self.users.find_by_username(details.username()).await? {
            if existing.is_admin() {
                return Ok(existing);
            }
            return Err(Error::rejected(
                ReasonCode::UsernameTaken,
                "Administrator username belongs to a non-admin account",
            ));
        }
        let admin = self.register(details, Role::Admin).await?;
        info!(user_id = %admin.id(), "administrator account created");
        Ok(admin)
    }

    async fn register(&self, details: &SignupDetails, role: Role) -> Result<User, Error> {
        if self.users.find_by_username(details.username()).await?.is_some() {
            return Err(Error::rejected(ReasonCode::UsernameTaken, USERNAME_TAKEN));
        }
        if self.users.find_by_email(details.email()).await?.is_some() {
            return Err(Error::rejected(ReasonCode::EmailRegistered, EMAIL_REGISTERED));
        }

        let digest = self.hasher.digest(details.password())?;
        let user = User::new(
            UserId::random(),
            details.username().clone(),
            details.email().clone(),
            role,
            digest,
            details.profile().clone(),
        );
        self.users.insert(&user).await?;
        Ok(user)
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error> {
        let user = self.register(details, Role::NonAdmin).await?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn signin(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error> {
        let unknown = || Error::rejected(ReasonCode::UnknownUsername, UNKNOWN_USERNAME);
        // A name that cannot be registered cannot exist either.
        let username = Username::new(credentials.username()).map_err(|_| unknown())?;
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(unknown)?;

        if !self.hasher.verify(credentials.password(), user.password()) {
            info!(user_id = %user.id(), "sign-in rejected: password mismatch");
            return Err(Error::rejected(
                ReasonCode::PasswordMismatch,
                PASSWORD_MISMATCH,
            ));
        }

        let session = self.sessions.issue(user.id()).await?;
        info!(user_id = %user.id(), "user signed in");
        Ok(SignedIn { user, session })
    }

    async fn signout(&self, token: &AccessToken) -> Result<User, Error> {
        let user = self.sessions.revoke(token).await?;
        info!(user_id = %user.id(), "user signed out");
        Ok(user)
    }

    async fn authenticate(&self, token: &AccessToken) -> Result<User, Error> {
        self.sessions
            .require_active(token)
            .await
            .map(|active| active.user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
