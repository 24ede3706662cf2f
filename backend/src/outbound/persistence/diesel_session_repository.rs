//! PostgreSQL-backed `SessionRepository` implementation.
//!
//! Tokens are never stored in clear: rows are keyed by the hex SHA-256
//! digest of the token, and lookups hash the presented token first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use sha2::{Digest, Sha256};

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{AccessToken, Session, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSessionRow, SessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_sessions;

/// Diesel-backed implementation of the `SessionRepository` port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn token_digest(token: &AccessToken) -> String {
    hex::encode(Sha256::digest(token.as_str().as_bytes()))
}

fn pool_error(error: PoolError) -> SessionPersistenceError {
    map_pool_error(error, SessionPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SessionPersistenceError {
    map_diesel_error(
        error,
        SessionPersistenceError::query,
        SessionPersistenceError::connection,
    )
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let digest = token_digest(session.token());
        let row = NewSessionRow {
            token_digest: &digest,
            user_id: *session.user_id().as_uuid(),
            issued_at: session.issued_at(),
            expires_at: session.expires_at(),
            logout_at: session.logout_at(),
        };
        diesel::insert_into(user_sessions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Session>, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<SessionRow> = user_sessions::table
            .filter(user_sessions::token_digest.eq(token_digest(token)))
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(|row| {
            Session::restore(
                token.clone(),
                UserId::from_uuid(row.user_id),
                row.issued_at,
                row.expires_at,
                row.logout_at,
            )
        }))
    }

    async fn sign_out(
        &self,
        token: &AccessToken,
        at: DateTime<Utc>,
    ) -> Result<bool, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(
            user_sessions::table
                .filter(user_sessions::token_digest.eq(token_digest(token)))
                .filter(user_sessions::logout_at.is_null()),
        )
        .set(user_sessions::logout_at.eq(Some(at)))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(updated > 0)
    }
}
