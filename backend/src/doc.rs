//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request/response DTOs, the schema wrappers for domain errors
//! ([`ErrorSchema`], [`ErrorCodeSchema`], [`ReasonCodeSchema`]) and two
//! security schemes: the access token header and Basic credentials for
//! sign-in.
//!
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::answers::{
    AnswerDetailsResponse, AnswerEditRequest, AnswerRequest, AnswerResponse,
};
use crate::inbound::http::questions::{
    QuestionDetailsResponse, QuestionRequest, QuestionResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ReasonCodeSchema};
use crate::inbound::http::users::{
    SessionResponse, SignupUserRequest, SignupUserResponse, UserDetailsResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the authentication schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AccessToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "authorization",
                "Access token returned by POST /api/v1/user/signin, raw or prefixed with `Bearer `.",
            ))),
        );
        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Quora backend API",
        description = "Questions and answers with token sessions and ownership rules.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AccessToken" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::signin,
        crate::inbound::http::users::signout,
        crate::inbound::http::users::user_profile,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::edit_question,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::questions::list_questions_by_user,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::answers::edit_answer,
        crate::inbound::http::answers::delete_answer,
        crate::inbound::http::answers::list_answers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ReasonCodeSchema,
        SignupUserRequest,
        SignupUserResponse,
        SessionResponse,
        UserDetailsResponse,
        QuestionRequest,
        QuestionResponse,
        QuestionDetailsResponse,
        AnswerRequest,
        AnswerEditRequest,
        AnswerResponse,
        AnswerDetailsResponse,
    )),
    tags(
        (name = "users", description = "Signup, sign-in and profiles"),
        (name = "questions", description = "Questions owned by signed-in users"),
        (name = "answers", description = "Answers to questions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
