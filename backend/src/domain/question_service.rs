//! Question use-cases gated by sessions and ownership.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::authorization::Policy;
use super::content::{Content, Question, QuestionId};
use super::error::{Error, ReasonCode};
use super::ports::{QuestionCommand, QuestionQuery, QuestionRepository, UserRepository};
use super::session::AccessToken;
use super::session_authority::SessionAuthority;
use super::user::UserId;

pub(crate) const QUESTION_NOT_FOUND: &str = "Entered question uuid does not exist";

pub(crate) fn parse_content(raw: &str) -> Result<Content, Error> {
    Content::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Implements [`QuestionCommand`] and [`QuestionQuery`].
#[derive(Clone)]
pub struct QuestionService {
    sessions: Arc<SessionAuthority>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl QuestionService {
    pub fn new(
        sessions: Arc<SessionAuthority>,
        questions: Arc<dyn QuestionRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            questions,
            users,
            clock,
        }
    }

    async fn load(&self, id: &QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::rejected(ReasonCode::QuestionNotFound, QUESTION_NOT_FOUND))
    }
}

#[async_trait]
impl QuestionCommand for QuestionService {
    async fn create(&self, token: &AccessToken, content: &str) -> Result<Question, Error> {
        let actor = self.sessions.require_active(token).await?;
        let content = parse_content(content)?;
        let question = Question::new(
            QuestionId::random(),
            content,
            self.clock.utc(),
            *actor.user.id(),
        );
        self.questions.insert(&question).await?;
        info!(question_id = %question.id(), owner = %question.owner(), "question created");
        Ok(question)
    }

    async fn edit(
        &self,
        token: &AccessToken,
        id: &QuestionId,
        content: &str,
    ) -> Result<Question, Error> {
        let actor = self.sessions.require_active(token).await?;
        let content = parse_content(content)?;
        let mut question = self.load(id).await?;
        Policy::OwnerOnly.authorize(
            &actor.user,
            question.owner(),
            "Only the question owner can edit the question",
        )?;
        question.revise(content);
        self.questions.update(&question).await?;
        info!(question_id = %id, "question edited");
        Ok(question)
    }

    async fn delete(&self, token: &AccessToken, id: &QuestionId) -> Result<Question, Error> {
        let actor = self.sessions.require_active(token).await?;
        let question = self.load(id).await?;
        Policy::OwnerOrAdmin.authorize(
            &actor.user,
            question.owner(),
            "Only the question owner or admin can delete the question",
        )?;
        if !self.questions.delete(id).await? {
            return Err(Error::rejected(ReasonCode::QuestionNotFound, QUESTION_NOT_FOUND));
        }
        info!(question_id = %id, actor = %actor.user.id(), "question deleted");
        Ok(question)
    }
}

#[async_trait]
impl QuestionQuery for QuestionService {
    async fn list_all(&self, token: &AccessToken) -> Result<Vec<Question>, Error> {
        self.sessions.require_active(token).await?;
        Ok(self.questions.list_all().await?)
    }

    async fn list_by_user(
        &self,
        token: &AccessToken,
        owner: &UserId,
    ) -> Result<Vec<Question>, Error> {
        self.sessions.require_active(token).await?;
        if self.users.find_by_id(owner).await?.is_none() {
            return Err(Error::rejected(
                ReasonCode::UserNotFound,
                "User with entered uuid whose question details are to be seen does not exist",
            ));
        }
        Ok(self.questions.list_by_owner(owner).await?)
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
