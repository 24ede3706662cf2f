//! Answer use-cases gated by sessions and ownership.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::authorization::Policy;
use super::content::{Answer, AnswerId, QuestionId};
use super::error::{Error, ReasonCode};
use super::ports::{AnswerCommand, AnswerQuery, AnswerRepository, QuestionRepository};
use super::question_service::{QUESTION_NOT_FOUND, parse_content};
use super::session::AccessToken;
use super::session_authority::SessionAuthority;

const ANSWER_NOT_FOUND: &str = "Entered answer uuid does not exist";

/// Implements [`AnswerCommand`] and [`AnswerQuery`].
#[derive(Clone)]
pub struct AnswerService {
    sessions: Arc<SessionAuthority>,
    answers: Arc<dyn AnswerRepository>,
    questions: Arc<dyn QuestionRepository>,
    clock: Arc<dyn Clock>,
}

impl AnswerService {
    pub fn new(
        sessions: Arc<SessionAuthority>,
        answers: Arc<dyn AnswerRepository>,
        questions: Arc<dyn QuestionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            answers,
            questions,
            clock,
        }
    }

    async fn require_question(&self, id: &QuestionId) -> Result<(), Error> {
        match self.questions.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::rejected(
                ReasonCode::QuestionNotFound,
                QUESTION_NOT_FOUND,
            )),
        }
    }

    async fn load(&self, id: &AnswerId) -> Result<Answer, Error> {
        self.answers
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::rejected(ReasonCode::AnswerNotFound, ANSWER_NOT_FOUND))
    }
}

#[async_trait]
impl AnswerCommand for AnswerService {
    async fn create(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
        content: &str,
    ) -> Result<Answer, Error> {
        let actor = self.sessions.require_active(token).await?;
        let content = parse_content(content)?;
        self.require_question(question_id).await?;
        let answer = Answer::new(
            AnswerId::random(),
            content,
            self.clock.utc(),
            *question_id,
            *actor.user.id(),
        );
        self.answers.insert(&answer).await?;
        info!(answer_id = %answer.id(), question_id = %question_id, "answer created");
        Ok(answer)
    }

    async fn edit(
        &self,
        token: &AccessToken,
        id: &AnswerId,
        content: &str,
    ) -> Result<Answer, Error> {
        let actor = self.sessions.require_active(token).await?;
        let content = parse_content(content)?;
        let mut answer = self.load(id).await?;
        Policy::OwnerOnly.authorize(
            &actor.user,
            answer.owner(),
            "Only the answer owner can edit the answer",
        )?;
        answer.revise(content);
        self.answers.update(&answer).await?;
        info!(answer_id = %id, "answer edited");
        Ok(answer)
    }

    async fn delete(&self, token: &AccessToken, id: &AnswerId) -> Result<Answer, Error> {
        let actor = self.sessions.require_active(token).await?;
        let answer = self.load(id).await?;
        Policy::OwnerOrAdmin.authorize(
            &actor.user,
            answer.owner(),
            "Only the answer owner or admin can delete the answer",
        )?;
        if !self.answers.delete(id).await? {
            return Err(Error::rejected(ReasonCode::AnswerNotFound, ANSWER_NOT_FOUND));
        }
        info!(answer_id = %id, actor = %actor.user.id(), "answer deleted");
        Ok(answer)
    }
}

#[async_trait]
impl AnswerQuery for AnswerService {
    async fn list_for_question(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, Error> {
        self.sessions.require_active(token).await?;
        self.require_question(question_id).await?;
        Ok(self.answers.list_for_question(question_id).await?)
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
