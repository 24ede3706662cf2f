//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by tests. All state sits
//! behind one mutex so each port call is a single critical section.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AnswerPersistenceError, AnswerRepository, QuestionPersistenceError, QuestionRepository,
    SessionPersistenceError, SessionRepository, UniqueUserField, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AccessToken, Answer, AnswerId, EmailAddress, Question, QuestionId, Session, User, UserId,
    Username,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct State {
    users: Vec<User>,
    sessions: HashMap<String, Session>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

/// Volatile store for users, sessions, questions and answers.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state.users.iter().any(|u| u.username() == user.username()) {
            return Err(UserPersistenceError::duplicate(UniqueUserField::Username));
        }
        if state.users.iter().any(|u| u.email() == user.email()) {
            return Err(UserPersistenceError::duplicate(UniqueUserField::Email));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|u| u.username() == username).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|u| u.email() == email).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn insert(&self, session: &Session) -> Result<(), SessionPersistenceError> {
        let mut state = self.lock().map_err(SessionPersistenceError::query)?;
        let key = session.token().as_str().to_owned();
        if state.sessions.contains_key(&key) {
            return Err(SessionPersistenceError::query("duplicate access token"));
        }
        state.sessions.insert(key, session.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Session>, SessionPersistenceError> {
        let state = self.lock().map_err(SessionPersistenceError::query)?;
        Ok(state.sessions.get(token.as_str()).cloned())
    }

    async fn sign_out(
        &self,
        token: &AccessToken,
        at: DateTime<Utc>,
    ) -> Result<bool, SessionPersistenceError> {
        let mut state = self.lock().map_err(SessionPersistenceError::query)?;
        Ok(state
            .sessions
            .get_mut(token.as_str())
            .is_some_and(|session| session.sign_out(at)))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn insert(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut state = self.lock().map_err(QuestionPersistenceError::query)?;
        state.questions.push(question.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionPersistenceError> {
        let state = self.lock().map_err(QuestionPersistenceError::query)?;
        Ok(state.questions.iter().find(|q| q.id() == id).cloned())
    }

    async fn update(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut state = self.lock().map_err(QuestionPersistenceError::query)?;
        // Last committed write wins; a row deleted in the meantime stays gone.
        if let Some(slot) = state.questions.iter_mut().find(|q| q.id() == question.id()) {
            *slot = question.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &QuestionId) -> Result<bool, QuestionPersistenceError> {
        let mut state = self.lock().map_err(QuestionPersistenceError::query)?;
        let before = state.questions.len();
        state.questions.retain(|q| q.id() != id);
        Ok(state.questions.len() != before)
    }

    async fn list_all(&self) -> Result<Vec<Question>, QuestionPersistenceError> {
        let state = self.lock().map_err(QuestionPersistenceError::query)?;
        Ok(state.questions.clone())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Question>, QuestionPersistenceError> {
        let state = self.lock().map_err(QuestionPersistenceError::query)?;
        Ok(state
            .questions
            .iter()
            .filter(|q| q.owner() == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut state = self.lock().map_err(AnswerPersistenceError::query)?;
        state.answers.push(answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerPersistenceError> {
        let state = self.lock().map_err(AnswerPersistenceError::query)?;
        Ok(state.answers.iter().find(|a| a.id() == id).cloned())
    }

    async fn update(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut state = self.lock().map_err(AnswerPersistenceError::query)?;
        if let Some(slot) = state.answers.iter_mut().find(|a| a.id() == answer.id()) {
            *slot = answer.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &AnswerId) -> Result<bool, AnswerPersistenceError> {
        let mut state = self.lock().map_err(AnswerPersistenceError::query)?;
        let before = state.answers.len();
        state.answers.retain(|a| a.id() != id);
        Ok(state.answers.len() != before)
    }

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        let state = self.lock().map_err(AnswerPersistenceError::query)?;
        Ok(state
            .answers
            .iter()
            .filter(|a| a.question_id() == question_id)
            .cloned()
            .collect())
    }
}
