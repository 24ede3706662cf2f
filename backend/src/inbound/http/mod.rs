//! HTTP inbound adapter exposing REST endpoints.

pub mod answers;
pub mod auth;
pub mod error;
pub mod health;
pub mod questions;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

use actix_web::{Scope, web};

use crate::domain::Error;

pub use error::ApiResult;

/// JSON extractor settings that report malformed bodies as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::Error::from(Error::invalid_request(format!("invalid JSON body: {err}")))
    })
}

/// Versioned API routes. Callers register [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use quora_backend::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(json_config())
        .service(users::signup)
        .service(users::signin)
        .service(users::signout)
        .service(users::user_profile)
        .service(questions::create_question)
        .service(questions::list_questions)
        .service(questions::edit_question)
        .service(questions::delete_question)
        .service(questions::list_questions_by_user)
        .service(answers::create_answer)
        .service(answers::edit_answer)
        .service(answers::delete_answer)
        .service(answers::list_answers)
}
