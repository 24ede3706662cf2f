//! Conversions from port errors into domain [`Error`] values.
//!
//! Connection failures become `service_unavailable`; everything else the
//! store reports becomes `internal`. Uniqueness violations on users keep
//! their stable signup reason codes so a lost race still reads as SGR-00x.

use super::error::{Error, ReasonCode};
use super::ports::{
    AnswerPersistenceError, PasswordHashError, QuestionPersistenceError, SessionPersistenceError,
    UniqueUserField, UserPersistenceError,
};

pub(crate) const USERNAME_TAKEN: &str =
    "Try any other Username, this Username has already been taken";
pub(crate) const EMAIL_REGISTERED: &str =
    "This user has already been registered, try with any other emailId";

impl From<UserPersistenceError> for Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::Duplicate {
                field: UniqueUserField::Username,
            } => Error::rejected(ReasonCode::UsernameTaken, USERNAME_TAKEN),
            UserPersistenceError::Duplicate {
                field: UniqueUserField::Email,
            } => Error::rejected(ReasonCode::EmailRegistered, EMAIL_REGISTERED),
        }
    }
}

impl From<SessionPersistenceError> for Error {
    fn from(error: SessionPersistenceError) -> Self {
        match error {
            SessionPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("session repository unavailable: {message}"))
            }
            SessionPersistenceError::Query { message } => {
                Error::internal(format!("session repository error: {message}"))
            }
        }
    }
}

impl From<QuestionPersistenceError> for Error {
    fn from(error: QuestionPersistenceError) -> Self {
        match error {
            QuestionPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("question repository unavailable: {message}"))
            }
            QuestionPersistenceError::Query { message } => {
                Error::internal(format!("question repository error: {message}"))
            }
        }
    }
}

impl From<AnswerPersistenceError> for Error {
    fn from(error: AnswerPersistenceError) -> Self {
        match error {
            AnswerPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("answer repository unavailable: {message}"))
            }
            AnswerPersistenceError::Query { message } => {
                Error::internal(format!("answer repository error: {message}"))
            }
        }
    }
}

impl From<PasswordHashError> for Error {
    fn from(error: PasswordHashError) -> Self {
        Error::internal(error.to_string())
    }
}
