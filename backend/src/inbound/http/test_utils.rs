//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::Trace;
use crate::domain::AccessToken;
use crate::inbound::http::api_scope;
use crate::test_support::TestContext;

/// App wired exactly like production routes, backed by `ctx`'s services.
pub fn test_app(
    ctx: &TestContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(ctx.http_state()))
        .wrap(Trace)
        .service(api_scope())
}

/// `Authorization` header pair presenting `token`.
pub fn bearer(token: &AccessToken) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", token.as_str()))
}

/// Decode a JSON response body.
pub async fn json_body(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}
