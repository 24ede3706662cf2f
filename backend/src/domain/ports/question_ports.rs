//! Driving ports for question use-cases.
//!
//! Content arrives unvalidated so the session check always runs first.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Question, QuestionId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Post a question owned by the session's user.
    async fn create(&self, token: &AccessToken, content: &str) -> Result<Question, Error>;

    /// Replace the body of a question the caller owns.
    async fn edit(
        &self,
        token: &AccessToken,
        id: &QuestionId,
        content: &str,
    ) -> Result<Question, Error>;

    /// Remove a question owned by the caller, or any question for admins.
    async fn delete(&self, token: &AccessToken, id: &QuestionId) -> Result<Question, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    async fn list_all(&self, token: &AccessToken) -> Result<Vec<Question>, Error>;

    /// Questions posted by `owner`. Fails with USR-001 for unknown users.
    async fn list_by_user(
        &self,
        token: &AccessToken,
        owner: &UserId,
    ) -> Result<Vec<Question>, Error>;
}
