//! Driving ports for answer use-cases.

use async_trait::async_trait;

use crate::domain::{AccessToken, Answer, AnswerId, Error, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerCommand: Send + Sync {
    /// Answer an existing question.
    async fn create(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
        content: &str,
    ) -> Result<Answer, Error>;

    async fn edit(
        &self,
        token: &AccessToken,
        id: &AnswerId,
        content: &str,
    ) -> Result<Answer, Error>;

    async fn delete(&self, token: &AccessToken, id: &AnswerId) -> Result<Answer, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerQuery: Send + Sync {
    /// Answers to `question_id` in insertion order.
    async fn list_for_question(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, Error>;
}
