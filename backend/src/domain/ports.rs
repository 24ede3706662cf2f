//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token generator) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod answer_ports;
mod answer_repository;
mod password_hasher;
mod question_ports;
mod question_repository;
mod session_repository;
mod token_generator;
mod user_profile_query;
mod user_repository;

pub use account_command::{AccountCommand, SignedIn};
pub use answer_ports::{AnswerCommand, AnswerQuery};
pub use answer_repository::{AnswerPersistenceError, AnswerRepository};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use question_ports::{QuestionCommand, QuestionQuery};
pub use question_repository::{QuestionPersistenceError, QuestionRepository};
pub use session_repository::{SessionPersistenceError, SessionRepository};
pub use token_generator::TokenGenerator;
pub use user_profile_query::UserProfileQuery;
pub use user_repository::{UniqueUserField, UserPersistenceError, UserRepository};

#[cfg(test)]
pub use account_command::MockAccountCommand;
#[cfg(test)]
pub use answer_ports::{MockAnswerCommand, MockAnswerQuery};
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use question_ports::{MockQuestionCommand, MockQuestionQuery};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use token_generator::MockTokenGenerator;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
