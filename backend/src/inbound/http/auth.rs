//! Request extractors for access tokens and sign-in credentials.
//!
//! Handlers take [`BearerToken`] or [`BasicCredentials`] as arguments so the
//! header parsing stays out of the handler bodies.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{Ready, ready};
use serde_json::json;

use crate::domain::{AccessToken, CredentialsValidationError, Error, LoginCredentials, ReasonCode};

/// Response header carrying the token issued at sign-in.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

const BEARER_SCHEME: &str = "Bearer";
const BASIC_SCHEME: &str = "Basic";

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}

/// The credentials after `scheme`, if the header uses it.
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let (head, rest) = value
        .split_once(char::is_whitespace)
        .unwrap_or((value, ""));
    head.eq_ignore_ascii_case(scheme).then_some(rest)
}

/// Access token from the `Authorization` header, raw or `Bearer`-prefixed.
///
/// A missing or blank header is treated as an unknown token (ATHR-001).
#[derive(Debug, Clone)]
pub struct BearerToken(AccessToken);

impl BearerToken {
    pub fn token(&self) -> &AccessToken {
        &self.0
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, Error> {
        let raw = authorization(headers).unwrap_or_default();
        let raw = strip_scheme(raw, BEARER_SCHEME).unwrap_or(raw);
        AccessToken::new(raw)
            .map(Self)
            .map_err(|_| Error::rejected(ReasonCode::NoActiveSession, "User has not signed in"))
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req.headers()))
    }
}

fn invalid_basic(message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": "authorization",
        "code": "invalid_basic_credentials",
    }))
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
        CredentialsValidationError::User(inner) => Error::invalid_request(inner.to_string()),
    }
}

/// Sign-in credentials from `Authorization: Basic base64(username:password)`.
#[derive(Debug, Clone)]
pub struct BasicCredentials(LoginCredentials);

impl BasicCredentials {
    pub fn into_inner(self) -> LoginCredentials {
        self.0
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, Error> {
        let raw = authorization(headers)
            .ok_or_else(|| invalid_basic("Basic credentials are required"))?;
        let encoded = strip_scheme(raw, BASIC_SCHEME)
            .ok_or_else(|| invalid_basic("Authorization must use the Basic scheme"))?;
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| invalid_basic("Basic credentials are not valid base64"))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| invalid_basic("Basic credentials are not valid UTF-8"))?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| invalid_basic("Basic credentials must be username:password"))?;
        LoginCredentials::try_from_parts(username, password)
            .map(Self)
            .map_err(map_credentials_error)
    }
}

impl FromRequest for BasicCredentials {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req.headers()))
    }
}
