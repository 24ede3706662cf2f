//! Port for question persistence.

use async_trait::async_trait;

use crate::domain::{Question, QuestionId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
    }
}

/// Storage for questions. Listings are returned in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert(&self, question: &Question) -> Result<(), QuestionPersistenceError>;

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionPersistenceError>;

    /// Persist the current content of an existing question.
    async fn update(&self, question: &Question) -> Result<(), QuestionPersistenceError>;

    /// Remove a question. Returns whether a row was removed.
    async fn delete(&self, id: &QuestionId) -> Result<bool, QuestionPersistenceError>;

    async fn list_all(&self) -> Result<Vec<Question>, QuestionPersistenceError>;

    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<Question>, QuestionPersistenceError>;
}
