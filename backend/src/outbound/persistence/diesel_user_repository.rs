//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username and email uniqueness is enforced by database constraints; a
//! violation surfaces as [`UserPersistenceError::Duplicate`] naming the
//! offending column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UniqueUserField, UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordDigest, Role, User, UserId, UserProfile, Username,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match unique_violation(&error) {
        Some(USERNAME_CONSTRAINT) => UserPersistenceError::duplicate(UniqueUserField::Username),
        Some(EMAIL_CONSTRAINT) => UserPersistenceError::duplicate(UniqueUserField::Email),
        Some(other) => {
            warn!(constraint = other, "unrecognised unique violation on users");
            UserPersistenceError::query("unique constraint violated")
        }
        None => map_diesel_error(
            error,
            UserPersistenceError::query,
            UserPersistenceError::connection,
        ),
    }
}

/// Convert a database row to a domain user, rejecting corrupt values.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |field: &str| {
        warn!(user_id = %row.id, field, "stored user failed validation");
        UserPersistenceError::query(format!("stored user has invalid {field}"))
    };
    let username = Username::new(&row.username).map_err(|_| corrupt("username"))?;
    let email = EmailAddress::new(&row.email).map_err(|_| corrupt("email"))?;
    let role: Role = row.role.parse().map_err(|_| corrupt("role"))?;
    let profile = UserProfile {
        first_name: row.first_name,
        last_name: row.last_name,
        country: row.country,
        about_me: row.about_me,
        date_of_birth: row.dob,
        contact_number: row.contact_number,
    };
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        email,
        role,
        PasswordDigest::new(row.password_salt, row.password_hash),
        profile,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let profile = user.profile();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            role: user.role().as_str(),
            password_salt: user.password().salt(),
            password_hash: user.password().hash(),
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            country: profile.country.as_deref(),
            about_me: profile.about_me.as_deref(),
            dob: profile.date_of_birth,
            contact_number: profile.contact_number.as_deref(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::super::diesel_error_mapping::test_errors::database_error;
    use super::*;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    fn row() -> UserRow {
        UserRow {
            id: uuid::Uuid::nil(),
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role: "admin".to_owned(),
            password_salt: "00".to_owned(),
            password_hash: "11".to_owned(),
            first_name: "Alice".to_owned(),
            last_name: "Tester".to_owned(),
            country: Some("NZ".to_owned()),
            about_me: None,
            dob: None,
            contact_number: None,
        }
    }

    #[rstest]
    #[case(USERNAME_CONSTRAINT, UniqueUserField::Username)]
    #[case(EMAIL_CONSTRAINT, UniqueUserField::Email)]
    fn unique_violations_name_the_column(
        #[case] constraint: &'static str,
        #[case] field: UniqueUserField,
    ) {
        let error = database_error(DatabaseErrorKind::UniqueViolation, Some(constraint));
        assert_eq!(diesel_error(error), UserPersistenceError::duplicate(field));
    }

    #[rstest]
    fn rows_convert_to_users() {
        let user = row_to_user(row()).expect("valid row");
        assert_eq!(user.username().as_ref(), "alice");
        assert!(user.is_admin());
        assert_eq!(user.profile().country.as_deref(), Some("NZ"));
    }

    #[rstest]
    fn corrupt_rows_are_query_errors() {
        let mut bad = row();
        bad.role = "superuser".to_owned();
        let err = row_to_user(bad).expect_err("unknown role");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
