//! End-to-end HTTP flow over the in-memory store.
//!
//! Walks one user from signup to signout through the public routes and
//! checks that the access token stops working afterwards.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quora_backend::Trace;
use quora_backend::domain::TRACE_ID_HEADER;
use quora_backend::inbound::http::api_scope;
use quora_backend::test_support::TestContext;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn ctx() -> TestContext {
    TestContext::new()
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[rstest]
#[actix_web::test]
async fn signup_to_signout_round_trip(ctx: TestContext) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.http_state()))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let signup = test::TestRequest::post()
        .uri("/api/v1/user/signup")
        .set_json(json!({
            "firstName": "Alice",
            "lastName": "Tester",
            "userName": "alice",
            "emailAddress": "alice@example.com",
            "password": "s3cret",
            "country": "NZ"
        }))
        .to_request();
    let res = test::call_service(&app, signup).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["status"], "USER SUCCESSFULLY REGISTERED");

    let signin = test::TestRequest::post()
        .uri("/api/v1/user/signin")
        .insert_header((AUTHORIZATION, basic("alice", "s3cret")))
        .to_request();
    let res = test::call_service(&app, signin).await;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res
        .headers()
        .get("access-token")
        .and_then(|value| value.to_str().ok())
        .map(|value| format!("Bearer {value}"))
        .expect("access token header");

    let ask = test::TestRequest::post()
        .uri("/api/v1/question/create")
        .insert_header((AUTHORIZATION, token.clone()))
        .set_json(json!({ "content": "What is a lifetime?" }))
        .to_request();
    let res = test::call_service(&app, ask).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let question: Value = test::read_body_json(res).await;
    let question_id = question["id"].as_str().expect("question id").to_owned();

    let answer = test::TestRequest::post()
        .uri(&format!("/api/v1/question/{question_id}/answer/create"))
        .insert_header((AUTHORIZATION, token.clone()))
        .set_json(json!({ "answer": "How long a borrow is valid." }))
        .to_request();
    let res = test::call_service(&app, answer).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let list = test::TestRequest::get()
        .uri(&format!("/api/v1/answer/all/{question_id}"))
        .insert_header((AUTHORIZATION, token.clone()))
        .to_request();
    let answers: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(answers.as_array().map(Vec::len), Some(1));
    assert_eq!(answers[0]["answerContent"], "How long a borrow is valid.");

    let signout = test::TestRequest::post()
        .uri("/api/v1/user/signout")
        .insert_header((AUTHORIZATION, token.clone()))
        .to_request();
    let res = test::call_service(&app, signout).await;
    assert_eq!(res.status(), StatusCode::OK);

    let after = test::TestRequest::get()
        .uri("/api/v1/question/all")
        .insert_header((AUTHORIZATION, token))
        .to_request();
    let res = test::call_service(&app, after).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "ATHR-002");
}

#[rstest]
#[actix_web::test]
async fn requests_without_a_token_are_refused(ctx: TestContext) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.http_state()))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/question/all").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["reason"], "ATHR-001");
}
