//! Access tokens and the sessions they identify.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use zeroize::Zeroizing;

use super::user::UserId;

/// Default lifetime stamped on newly issued sessions.
pub const DEFAULT_SESSION_TTL: TimeDelta = TimeDelta::hours(8);

/// Raised when a presented token is structurally unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessTokenError {
    #[error("access token must not be empty")]
    Empty,
}

/// Opaque bearer token presented by clients.
///
/// `Debug` never prints the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccessTokenError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccessTokenError::Empty);
        }
        if trimmed.len() == raw.len() {
            return Ok(Self(Zeroizing::new(raw)));
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Wrap a token minted by a [`TokenGenerator`](super::ports::TokenGenerator).
    pub(crate) fn from_generated(raw: String) -> Self {
        Self(Zeroizing::new(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Lifecycle state derived from a session's timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    SignedOut,
    Expired,
}

/// Sign-in record binding a token to a user.
///
/// ## Invariants
/// - `logout_at` is only ever set by [`Session::sign_out`] and never cleared.
/// - `expires_at` is strictly after `issued_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: AccessToken,
    user_id: UserId,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    logout_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a new session at `now` lasting `ttl`.
    pub fn issue(token: AccessToken, user_id: UserId, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            token,
            user_id,
            issued_at: now,
            expires_at: now + ttl,
            logout_at: None,
        }
    }

    /// Rebuild a session from persisted fields.
    pub fn restore(
        token: AccessToken,
        user_id: UserId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        logout_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token,
            user_id,
            issued_at,
            expires_at,
            logout_at,
        }
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn logout_at(&self) -> Option<DateTime<Utc>> {
        self.logout_at
    }

    pub fn is_signed_out(&self) -> bool {
        self.logout_at.is_some()
    }

    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Mark the session signed out. Returns `false` if it already was.
    pub fn sign_out(&mut self, now: DateTime<Utc>) -> bool {
        if self.logout_at.is_some() {
            return false;
        }
        self.logout_at = Some(now);
        true
    }
}

/// Lifetime rules applied when issuing and checking sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    ttl: TimeDelta,
    enforce_expiry: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL,
            enforce_expiry: false,
        }
    }
}

impl SessionPolicy {
    /// Build a policy. Non-positive lifetimes fall back to the default.
    pub fn new(ttl: TimeDelta, enforce_expiry: bool) -> Self {
        let ttl = if ttl > TimeDelta::zero() {
            ttl
        } else {
            DEFAULT_SESSION_TTL
        };
        Self {
            ttl,
            enforce_expiry,
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn enforces_expiry(&self) -> bool {
        self.enforce_expiry
    }

    /// Classify `session` at `now`. Sign-out wins over expiry.
    pub fn state_of(&self, session: &Session, now: DateTime<Utc>) -> SessionState {
        if session.is_signed_out() {
            SessionState::SignedOut
        } else if self.enforce_expiry && session.has_expired(now) {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }
}
