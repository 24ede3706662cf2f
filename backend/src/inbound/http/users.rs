//! Account and profile API handlers.
//!
//! ```text
//! POST /api/v1/user/signup {"firstName":"Ada","lastName":"Lovelace",...}
//! POST /api/v1/user/signin   Authorization: Basic base64(username:password)
//! POST /api/v1/user/signout  Authorization: <access token>
//! GET  /api/v1/userprofile/{userId}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::SignedIn;
use crate::domain::{
    CredentialsValidationError, Error, SignupDetails, User, UserProfile, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{ACCESS_TOKEN_HEADER, BasicCredentials, BearerToken};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::user_path_id;

const REGISTERED: &str = "USER SUCCESSFULLY REGISTERED";
const SIGNED_IN: &str = "SIGNED IN SUCCESSFULLY";
const SIGNED_OUT: &str = "SIGNED OUT SUCCESSFULLY";

/// Signup request body for `POST /api/v1/user/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email_address: String,
    pub password: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "1815-12-10")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

impl TryFrom<SignupUserRequest> for SignupDetails {
    type Error = CredentialsValidationError;

    fn try_from(value: SignupUserRequest) -> Result<Self, Self::Error> {
        let mut profile = UserProfile::new(&value.first_name, &value.last_name)?;
        profile.country = value.country;
        profile.about_me = value.about_me;
        profile.date_of_birth = value.dob;
        profile.contact_number = value.contact_number;
        Self::try_new(
            &value.user_name,
            &value.email_address,
            &value.password,
            profile,
        )
    }
}

/// Body returned after registration.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupUserResponse {
    pub id: Uuid,
    #[schema(example = "USER SUCCESSFULLY REGISTERED")]
    pub status: String,
}

/// Body returned by sign-in and sign-out.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    #[schema(example = "SIGNED IN SUCCESSFULLY")]
    pub message: String,
}

/// Public profile of a registered user.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email_address: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

impl From<User> for UserDetailsResponse {
    fn from(user: User) -> Self {
        let profile = user.profile().clone();
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            user_name: user.username().to_string(),
            email_address: user.email().to_string(),
            country: profile.country,
            about_me: profile.about_me,
            dob: profile.date_of_birth,
            contact_number: profile.contact_number,
        }
    }
}

fn map_signup_validation_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match &err {
        CredentialsValidationError::EmptyUsername => ("userName", "empty_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
        CredentialsValidationError::User(inner) => match inner {
            UserValidationError::UsernameTooLong { .. }
            | UserValidationError::UsernameInvalidCharacters
            | UserValidationError::EmptyUsername => ("userName", "invalid_username"),
            UserValidationError::EmptyEmail | UserValidationError::InvalidEmail => {
                ("emailAddress", "invalid_email")
            }
            UserValidationError::EmptyFirstName => ("firstName", "empty_first_name"),
            UserValidationError::EmptyLastName => ("lastName", "empty_last_name"),
            UserValidationError::InvalidId | UserValidationError::UnknownRole(_) => {
                return Error::invalid_request(err.to_string());
            }
        },
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Register a non-admin account.
#[utoipa::path(
    post,
    path = "/api/v1/user/signup",
    request_body = SignupUserRequest,
    responses(
        (status = 201, description = "Account created", body = SignupUserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username taken (SGR-001) or email registered (SGR-002)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/user/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupUserRequest>,
) -> ApiResult<HttpResponse> {
    let details =
        SignupDetails::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let user = state.accounts.signup(&details).await?;
    Ok(HttpResponse::Created().json(SignupUserResponse {
        id: *user.id().as_uuid(),
        status: REGISTERED.to_owned(),
    }))
}

/// Verify Basic credentials and issue an access token.
///
/// The token is returned in the `access-token` response header.
#[utoipa::path(
    post,
    path = "/api/v1/user/signin",
    responses(
        (status = 200, description = "Signed in", body = SessionResponse,
            headers(("access-token" = String, description = "Token for later requests"))),
        (status = 400, description = "Malformed Basic credentials", body = ErrorSchema),
        (status = 401, description = "Unknown username (ATH-001) or wrong password (ATH-002)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signin",
    security(("BasicAuth" = []))
)]
#[post("/user/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
) -> ApiResult<HttpResponse> {
    let credentials = credentials.into_inner();
    let SignedIn { user, session } = state.accounts.signin(&credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header((ACCESS_TOKEN_HEADER, session.token().as_str()))
        .json(SessionResponse {
            id: *user.id().as_uuid(),
            message: SIGNED_IN.to_owned(),
        }))
}

/// Sign out the session behind the presented token.
#[utoipa::path(
    post,
    path = "/api/v1/user/signout",
    responses(
        (status = 200, description = "Signed out", body = SessionResponse),
        (status = 401, description = "Unknown token (ATHR-001) or already signed out (ATHR-002)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signout"
)]
#[post("/user/signout")]
pub async fn signout(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<SessionResponse>> {
    let user = state.accounts.signout(token.token()).await?;
    Ok(web::Json(SessionResponse {
        id: *user.id().as_uuid(),
        message: SIGNED_OUT.to_owned(),
    }))
}

/// Fetch any user's public profile.
#[utoipa::path(
    get,
    path = "/api/v1/userprofile/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Profile", body = UserDetailsResponse),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 404, description = "Unknown user (USR-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userProfile"
)]
#[get("/userprofile/{user_id}")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDetailsResponse>> {
    let user_id = user_path_id(&state, token.token(), &path.into_inner()).await?;
    let user = state.profile.fetch_profile(token.token(), &user_id).await?;
    Ok(web::Json(UserDetailsResponse::from(user)))
}
