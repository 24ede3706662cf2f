//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AnswerCommand, AnswerQuery, QuestionCommand, QuestionQuery, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub answers: Arc<dyn AnswerCommand>,
    pub answers_query: Arc<dyn AnswerQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        profile: Arc<dyn UserProfileQuery>,
        questions: Arc<dyn QuestionCommand>,
        questions_query: Arc<dyn QuestionQuery>,
        answers: Arc<dyn AnswerCommand>,
        answers_query: Arc<dyn AnswerQuery>,
    ) -> Self {
        Self {
            accounts,
            profile,
            questions,
            questions_query,
            answers,
            answers_query,
        }
    }
}
