//! Questions, answers and their text bodies.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Raised when a content body or identifier is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("content must not be empty")]
    Blank,
    #[error("identifier must be a valid UUID")]
    InvalidId,
}

/// Non-blank text body of a question or answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Content(String);

impl Content {
    /// Validate a body. Surrounding whitespace is kept; blank input is not.
    pub fn new(raw: impl Into<String>) -> Result<Self, ContentValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ContentValidationError::Blank);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Content> for String {
    fn from(value: Content) -> Self {
        value.0
    }
}

impl TryFrom<String> for Content {
    type Error = ContentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid, ContentValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ContentValidationError::InvalidId)
}

/// Question identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContentValidationError> {
        parse_uuid(raw.as_ref()).map(Self)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Answer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(Uuid);

impl AnswerId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContentValidationError> {
        parse_uuid(raw.as_ref()).map(Self)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A posted question.
///
/// ## Invariants
/// - `owner` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    content: Content,
    created_at: DateTime<Utc>,
    owner: UserId,
}

impl Question {
    pub fn new(id: QuestionId, content: Content, created_at: DateTime<Utc>, owner: UserId) -> Self {
        Self {
            id,
            content,
            created_at,
            owner,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Replace the body, keeping identity and ownership.
    pub fn revise(&mut self, content: Content) {
        self.content = content;
    }
}

/// An answer attached to a question.
///
/// ## Invariants
/// - `owner` and `question_id` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: AnswerId,
    content: Content,
    created_at: DateTime<Utc>,
    question_id: QuestionId,
    owner: UserId,
}

impl Answer {
    pub fn new(
        id: AnswerId,
        content: Content,
        created_at: DateTime<Utc>,
        question_id: QuestionId,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            question_id,
            owner,
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn revise(&mut self, content: Content) {
        self.content = content;
    }
}
