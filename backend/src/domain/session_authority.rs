//! Issues, resolves and revokes access tokens.
//!
//! Every authenticated use-case starts with [`SessionAuthority::require_active`],
//! which maps the presented token to a live session and a freshly loaded user.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use super::error::{Error, ReasonCode};
use super::ports::{SessionRepository, TokenGenerator, UserRepository};
use super::session::{AccessToken, Session, SessionPolicy, SessionState};
use super::user::{User, UserId};

const NOT_SIGNED_IN: &str = "User has not signed in";
const SIGNED_OUT: &str = "User is signed out. Sign in first";
const EXPIRED: &str = "Session has expired. Sign in again";

/// A session that passed [`SessionAuthority::require_active`], with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session: Session,
    pub user: User,
}

/// Session lifecycle service shared by every authenticated use-case.
#[derive(Clone)]
pub struct SessionAuthority {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenGenerator>,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl SessionAuthority {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenGenerator>,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            sessions,
            users,
            tokens,
            clock,
            policy,
        }
    }

    /// Lifetime rules in force.
    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Open and persist a new session for `user_id`.
    pub async fn issue(&self, user_id: &UserId) -> Result<Session, Error> {
        let session = Session::issue(
            self.tokens.generate(),
            *user_id,
            self.clock.utc(),
            self.policy.ttl(),
        );
        self.sessions.insert(&session).await?;
        info!(user_id = %user_id, expires_at = %session.expires_at(), "session issued");
        Ok(session)
    }

    /// Exact-token lookup. Unknown tokens fail with ATHR-001.
    pub async fn resolve(&self, token: &AccessToken) -> Result<Session, Error> {
        self.sessions
            .find_by_token(token)
            .await?
            .ok_or_else(|| Error::rejected(ReasonCode::NoActiveSession, NOT_SIGNED_IN))
    }

    /// Resolve `token` to an active session and its current owner.
    ///
    /// # Errors
    /// - ATHR-001 when no session exists or its user has disappeared.
    /// - ATHR-002 when the session was signed out, or has expired while
    ///   expiry enforcement is enabled.
    pub async fn require_active(&self, token: &AccessToken) -> Result<ActiveSession, Error> {
        let session = self.resolve(token).await?;
        match self.policy.state_of(&session, self.clock.utc()) {
            SessionState::Active => {}
            SessionState::SignedOut => {
                debug!(user_id = %session.user_id(), "rejected signed-out session");
                return Err(Error::rejected(ReasonCode::SignedOut, SIGNED_OUT));
            }
            SessionState::Expired => {
                debug!(user_id = %session.user_id(), "rejected expired session");
                return Err(Error::rejected(ReasonCode::SignedOut, EXPIRED));
            }
        }
        let user = self.load_owner(&session).await?;
        Ok(ActiveSession { session, user })
    }

    /// Sign out the session behind `token` and return its owner.
    ///
    /// A second revoke of the same token fails with ATHR-002, including when
    /// two revokes race: the store only stamps `logout_at` once.
    pub async fn revoke(&self, token: &AccessToken) -> Result<User, Error> {
        let session = self.resolve(token).await?;
        if session.is_signed_out() {
            return Err(Error::rejected(ReasonCode::SignedOut, SIGNED_OUT));
        }
        let user = self.load_owner(&session).await?;
        if !self.sessions.sign_out(token, self.clock.utc()).await? {
            debug!(user_id = %user.id(), "lost sign-out race");
            return Err(Error::rejected(ReasonCode::SignedOut, SIGNED_OUT));
        }
        info!(user_id = %user.id(), "session revoked");
        Ok(user)
    }

    async fn load_owner(&self, session: &Session) -> Result<User, Error> {
        self.users
            .find_by_id(session.user_id())
            .await?
            .ok_or_else(|| Error::rejected(ReasonCode::NoActiveSession, NOT_SIGNED_IN))
    }
}

#[cfg(test)]
#[path = "session_authority_tests.rs"]
mod tests;
