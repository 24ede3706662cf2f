//! Authentication inputs: sign-in credentials and signup details.
//!
//! Handlers build these from raw strings so services only ever see
//! validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserProfile, UserValidationError, Username};

/// Raised when sign-in or signup inputs are malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// A user field failed validation.
    User(UserValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::User(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyUsername => Self::EmptyUsername,
            other => Self::User(other),
        }
    }
}

/// Validated sign-in credentials.
///
/// The username is trimmed; the password keeps caller whitespace so that
/// digests are computed over exactly what was typed.
///
/// # Examples
/// ```
/// use quora_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "s3cret").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Everything needed to register an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    profile: UserProfile,
}

impl SignupDetails {
    /// Validate raw signup inputs.
    pub fn try_new(
        username: &str,
        email: &str,
        password: &str,
        profile: UserProfile,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
            profile,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile() -> UserProfile {
        UserProfile::new("Ada", "Lovelace").expect("profile")
    }

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("   ", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("user", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("alice", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("", "a@b.io", "pw", CredentialsValidationError::EmptyUsername)]
    #[case(
        "alice",
        "nope",
        "pw",
        CredentialsValidationError::User(UserValidationError::InvalidEmail)
    )]
    #[case("alice", "a@b.io", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_signup(
        profile: UserProfile,
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = SignupDetails::try_new(username, email, password, profile)
            .expect_err("invalid signup must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn valid_signup_normalises_fields(profile: UserProfile) {
        let details = SignupDetails::try_new(" ada ", "ada@example.com", "engine", profile)
            .expect("valid signup");
        assert_eq!(details.username().as_ref(), "ada");
        assert_eq!(details.email().as_ref(), "ada@example.com");
        assert_eq!(details.password(), "engine");
        assert_eq!(details.profile().last_name, "Lovelace");
    }
}
