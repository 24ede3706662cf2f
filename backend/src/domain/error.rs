//! Domain-level error type shared by services and adapters.
//!
//! Errors are transport agnostic. Each carries a coarse [`ErrorCode`] that
//! adapters map onto a protocol status and, for rule violations, a stable
//! [`ReasonCode`] that clients match on (`ATHR-001`, `QUES-001`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Failure category used to select a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No usable session, or credentials were rejected.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// A referenced entity does not exist.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

/// Stable reason codes exposed to API clients.
///
/// The serialised strings are part of the public contract and must never
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// No session exists for the presented access token.
    #[serde(rename = "ATHR-001")]
    NoActiveSession,
    /// The session behind the token has been signed out.
    #[serde(rename = "ATHR-002")]
    SignedOut,
    /// The actor neither owns the resource nor holds a role that overrides it.
    #[serde(rename = "ATHR-003")]
    NotPermitted,
    /// No answer has the requested id.
    #[serde(rename = "ANS-001")]
    AnswerNotFound,
    /// No question has the requested id.
    #[serde(rename = "QUES-001")]
    QuestionNotFound,
    /// No user has the requested id.
    #[serde(rename = "USR-001")]
    UserNotFound,
    /// Signup username is already registered.
    #[serde(rename = "SGR-001")]
    UsernameTaken,
    /// Signup email is already registered.
    #[serde(rename = "SGR-002")]
    EmailRegistered,
    /// Sign-in username is unknown.
    #[serde(rename = "ATH-001")]
    UnknownUsername,
    /// Sign-in password does not match.
    #[serde(rename = "ATH-002")]
    PasswordMismatch,
}

impl ReasonCode {
    /// Wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoActiveSession => "ATHR-001",
            Self::SignedOut => "ATHR-002",
            Self::NotPermitted => "ATHR-003",
            Self::AnswerNotFound => "ANS-001",
            Self::QuestionNotFound => "QUES-001",
            Self::UserNotFound => "USR-001",
            Self::UsernameTaken => "SGR-001",
            Self::EmailRegistered => "SGR-002",
            Self::UnknownUsername => "ATH-001",
            Self::PasswordMismatch => "ATH-002",
        }
    }

    /// Failure category the reason belongs to.
    #[must_use]
    pub const fn category(self) -> ErrorCode {
        match self {
            Self::NoActiveSession
            | Self::SignedOut
            | Self::UnknownUsername
            | Self::PasswordMismatch => ErrorCode::Unauthorized,
            Self::NotPermitted => ErrorCode::Forbidden,
            Self::AnswerNotFound | Self::QuestionNotFound | Self::UserNotFound => {
                ErrorCode::NotFound
            }
            Self::UsernameTaken | Self::EmailRegistered => ErrorCode::Conflict,
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error payload returned by services and rendered by adapters.
///
/// # Examples
/// ```
/// use quora_backend::domain::{Error, ErrorCode, ReasonCode};
///
/// let err = Error::rejected(ReasonCode::NotPermitted, "only the owner can edit");
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// assert_eq!(err.reason(), Some(ReasonCode::NotPermitted));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<ReasonCode>,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            reason: None,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Create an error for a rule violation identified by a stable reason.
    pub fn rejected(reason: ReasonCode, message: impl Into<String>) -> Self {
        let mut error = Self::new(reason.category(), message);
        error.reason = Some(reason);
        error
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Stable reason code, present for domain rule violations.
    pub fn reason(&self) -> Option<ReasonCode> {
        self.reason
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, if one was in scope.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details for clients.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach or replace the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(reason) => write!(f, "{reason}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
