//! Port for answer persistence.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "answer repository query failed: {message}",
    }
}

/// Storage for answers. Listings are returned in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerPersistenceError>;

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerPersistenceError>;

    /// Persist the current content of an existing answer.
    async fn update(&self, answer: &Answer) -> Result<(), AnswerPersistenceError>;

    /// Remove an answer. Returns whether a row was removed.
    async fn delete(&self, id: &AnswerId) -> Result<bool, AnswerPersistenceError>;

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerPersistenceError>;
}
