//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{answers, questions, user_sessions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub password_salt: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_salt: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub country: Option<&'a str>,
    pub about_me: Option<&'a str>,
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Session models
// ---------------------------------------------------------------------------

/// Row struct for reading from the user_sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

/// Insertable struct for new sessions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub token_digest: &'a str,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Question and answer models
// ---------------------------------------------------------------------------

/// Row struct for reading from the questions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new questions. `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the answers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub content: String,
    pub question_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new answers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub question_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}
