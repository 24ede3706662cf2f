//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered accounts. `username` and `email` carry unique constraints
    /// named `users_username_key` and `users_email_key`.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        role -> Varchar,
        password_salt -> Varchar,
        password_hash -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        country -> Nullable<Varchar>,
        about_me -> Nullable<Text>,
        dob -> Nullable<Date>,
        contact_number -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sign-in sessions keyed by the SHA-256 digest of their access token.
    user_sessions (token_digest) {
        token_digest -> Varchar,
        user_id -> Uuid,
        issued_at -> Timestamptz,
        expires_at -> Timestamptz,
        logout_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Questions. `seq` preserves insertion order for listings.
    questions (id) {
        seq -> Int8,
        id -> Uuid,
        content -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers. `question_id` has no foreign key so answers outlive their question.
    answers (id) {
        seq -> Int8,
        id -> Uuid,
        content -> Text,
        question_id -> Uuid,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_sessions -> users (user_id));
diesel::joinable!(questions -> users (owner_id));
diesel::joinable!(answers -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_sessions, questions, answers);
