//! Domain primitives, services and ports.
//!
//! Purpose: hold the rules of the Q&A platform independent of HTTP and
//! storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode / ReasonCode: transport agnostic failures.
//! - User, Session, Question, Answer: entities.
//! - Policy: ownership and role checks.
//! - SessionAuthority and the `*Service` types implementing the driving ports.

pub mod account_service;
pub mod answer_service;
pub mod auth;
pub mod authorization;
pub mod content;
pub mod error;
pub mod ports;
pub mod profile_service;
pub mod question_service;
mod repository_errors;
pub mod session;
pub mod session_authority;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::answer_service::AnswerService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, SignupDetails};
pub use self::authorization::{Decision, Policy};
pub use self::content::{
    Answer, AnswerId, Content, ContentValidationError, Question, QuestionId,
};
pub use self::error::{Error, ErrorCode, ReasonCode};
pub use self::profile_service::ProfileService;
pub use self::question_service::QuestionService;
pub use self::session::{
    AccessToken, AccessTokenError, DEFAULT_SESSION_TTL, Session, SessionPolicy, SessionState,
};
pub use self::session_authority::{ActiveSession, SessionAuthority};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordDigest, Role, User, UserId, UserProfile, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use quora_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
