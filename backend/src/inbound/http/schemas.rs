//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No usable session, or credentials were rejected.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness rule was violated.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::ReasonCode`].
///
/// Stable codes clients match on; the strings never change.
#[derive(ToSchema)]
#[schema(as = crate::domain::ReasonCode)]
pub enum ReasonCodeSchema {
    #[schema(rename = "ATHR-001")]
    NoActiveSession,
    #[schema(rename = "ATHR-002")]
    SignedOut,
    #[schema(rename = "ATHR-003")]
    NotPermitted,
    #[schema(rename = "ANS-001")]
    AnswerNotFound,
    #[schema(rename = "QUES-001")]
    QuestionNotFound,
    #[schema(rename = "USR-001")]
    UserNotFound,
    #[schema(rename = "SGR-001")]
    UsernameTaken,
    #[schema(rename = "SGR-002")]
    EmailRegistered,
    #[schema(rename = "ATH-001")]
    UnknownUsername,
    #[schema(rename = "ATH-002")]
    PasswordMismatch,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Failure category.
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Stable reason code for rule violations.
    reason: Option<ReasonCodeSchema>,
    /// Human-readable message returned to clients.
    #[schema(example = "Only the question owner can edit the question")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
