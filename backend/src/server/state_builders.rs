//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use quora_backend::domain::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use quora_backend::domain::{
    AccountService, AnswerService, ProfileService, QuestionService, SessionAuthority,
};
use quora_backend::inbound::http::state::HttpState;
use quora_backend::outbound::crypto::{Argon2PasswordHasher, RandomTokenGenerator};
use quora_backend::outbound::memory::InMemoryStore;
use quora_backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselQuestionRepository, DieselSessionRepository,
    DieselUserRepository,
};

use super::ServerConfig;
use super::config::Storage;

/// Repository handles shared by every service.
struct Repositories {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
}

impl Repositories {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            sessions: Arc::new(DieselSessionRepository::new(pool.clone())),
            questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
            answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
        }
    }

    fn memory(store: &Arc<InMemoryStore>) -> Self {
        let store = Arc::clone(store);
        Self {
            users: store.clone(),
            sessions: store.clone(),
            questions: store.clone(),
            answers: store,
        }
    }
}

/// Services built for one server instance.
pub(crate) struct AppServices {
    pub(crate) accounts: AccountService,
    pub(crate) http_state: HttpState,
}

/// Select Diesel repositories when a pool is configured, otherwise the
/// in-memory store, and wire the domain services over them.
pub(crate) fn build_services(config: &ServerConfig) -> AppServices {
    let repos = match &config.storage {
        Storage::Postgres(pool) => Repositories::diesel(pool),
        Storage::Memory(store) => Repositories::memory(store),
    };
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let authority = Arc::new(SessionAuthority::new(
        repos.sessions.clone(),
        repos.users.clone(),
        Arc::new(RandomTokenGenerator),
        clock.clone(),
        config.session_policy,
    ));
    let accounts = AccountService::new(
        repos.users.clone(),
        Arc::new(Argon2PasswordHasher),
        authority.clone(),
    );
    let profile = ProfileService::new(authority.clone(), repos.users.clone());
    let questions = Arc::new(QuestionService::new(
        authority.clone(),
        repos.questions.clone(),
        repos.users.clone(),
        clock.clone(),
    ));
    let answers = Arc::new(AnswerService::new(
        authority,
        repos.answers,
        repos.questions,
        clock,
    ));
    let http_state = HttpState::new(
        Arc::new(accounts.clone()),
        Arc::new(profile),
        questions.clone(),
        questions,
        answers.clone(),
        answers,
    );
    AppServices {
        accounts,
        http_state,
    }
}
