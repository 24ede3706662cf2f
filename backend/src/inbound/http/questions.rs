//! Question API handlers.
//!
//! ```text
//! POST   /api/v1/question/create {"content":"what is X?"}
//! GET    /api/v1/question/all
//! PUT    /api/v1/question/edit/{questionId} {"content":"what is Y?"}
//! DELETE /api/v1/question/delete/{questionId}
//! GET    /api/v1/question/all/{userId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Question;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{question_path_id, user_path_id};

/// Body for creating or editing a question.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuestionRequest {
    #[schema(example = "what is X?")]
    pub content: String,
}

/// Outcome of a question write.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: Uuid,
    #[schema(example = "QUESTION CREATED")]
    pub status: String,
}

impl QuestionResponse {
    fn new(question: &Question, status: &str) -> Self {
        Self {
            id: *question.id().as_uuid(),
            status: status.to_owned(),
        }
    }
}

/// A question as listed to clients.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuestionDetailsResponse {
    pub id: Uuid,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: *question.id().as_uuid(),
            content: question.content().to_string(),
        }
    }
}

fn details(questions: Vec<Question>) -> Vec<QuestionDetailsResponse> {
    questions.into_iter().map(Into::into).collect()
}

/// Post a question owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/question/create",
    request_body = QuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Blank content", body = ErrorSchema),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/question/create")]
pub async fn create_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<HttpResponse> {
    let question = state
        .questions
        .create(token.token(), &payload.content)
        .await?;
    Ok(HttpResponse::Created().json(QuestionResponse::new(&question, "QUESTION CREATED")))
}

/// List every question.
#[utoipa::path(
    get,
    path = "/api/v1/question/all",
    responses(
        (status = 200, description = "Questions", body = [QuestionDetailsResponse]),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
#[get("/question/all")]
pub async fn list_questions(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<Vec<QuestionDetailsResponse>>> {
    let questions = state.questions_query.list_all(token.token()).await?;
    Ok(web::Json(details(questions)))
}

/// Replace a question's content. Only the owner may edit.
#[utoipa::path(
    put,
    path = "/api/v1/question/edit/{question_id}",
    params(("question_id" = String, Path, description = "Question identifier")),
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Question edited", body = QuestionResponse),
        (status = 400, description = "Blank content", body = ErrorSchema),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 403, description = "Not the owner (ATHR-003)", body = ErrorSchema),
        (status = 404, description = "Unknown question (QUES-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "editQuestion"
)]
#[put("/question/edit/{question_id}")]
pub async fn edit_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<web::Json<QuestionResponse>> {
    let id = question_path_id(&state, token.token(), &path.into_inner()).await?;
    let question = state
        .questions
        .edit(token.token(), &id, &payload.content)
        .await?;
    Ok(web::Json(QuestionResponse::new(&question, "QUESTION EDITED")))
}

/// Remove a question. Owners and administrators may delete.
#[utoipa::path(
    delete,
    path = "/api/v1/question/delete/{question_id}",
    params(("question_id" = String, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question deleted", body = QuestionResponse),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 403, description = "Neither owner nor admin (ATHR-003)", body = ErrorSchema),
        (status = 404, description = "Unknown question (QUES-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
#[delete("/question/delete/{question_id}")]
pub async fn delete_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<QuestionResponse>> {
    let id = question_path_id(&state, token.token(), &path.into_inner()).await?;
    let question = state.questions.delete(token.token(), &id).await?;
    Ok(web::Json(QuestionResponse::new(&question, "QUESTION DELETED")))
}

/// List the questions posted by one user.
#[utoipa::path(
    get,
    path = "/api/v1/question/all/{user_id}",
    params(("user_id" = String, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Questions", body = [QuestionDetailsResponse]),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 404, description = "Unknown user (USR-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestionsByUser"
)]
#[get("/question/all/{user_id}")]
pub async fn list_questions_by_user(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<QuestionDetailsResponse>>> {
    let owner = user_path_id(&state, token.token(), &path.into_inner()).await?;
    let questions = state
        .questions_query
        .list_by_user(token.token(), &owner)
        .await?;
    Ok(web::Json(details(questions)))
}

#[cfg(test)]
mod tests {
    use crate::domain::ports::QuestionCommand;
    use crate::inbound::http::test_utils::{bearer, json_body, test_app};
    use crate::test_support::TestContext;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn ctx() -> TestContext {
        TestContext::new()
    }

    #[rstest]
    #[actix_web::test]
    async fn create_then_list_returns_the_question(ctx: TestContext) {
        let token = ctx.signin("alice").await;
        let app = actix_test::init_service(test_app(&ctx)).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/v1/question/create")
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "what is X?" }))
            .to_request();
        let response = actix_test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["status"], "QUESTION CREATED");

        let list = actix_test::TestRequest::get()
            .uri("/api/v1/question/all")
            .insert_header(bearer(&token))
            .to_request();
        let listed = json_body(actix_test::call_service(&app, list).await).await;
        assert_eq!(
            listed,
            json!([{ "id": created["id"], "content": "what is X?" }])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_content_is_an_invalid_request(ctx: TestContext) {
        let token = ctx.signin("alice").await;
        let app = actix_test::init_service(test_app(&ctx)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/question/create")
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "   " }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = json_body(response).await;
        assert_eq!(value["code"], "invalid_request");
        assert!(value.get("reason").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn non_owner_edit_is_forbidden(ctx: TestContext) {
        let alice = ctx.signin("alice").await;
        let bob = ctx.signin("bob").await;
        let question = ctx
            .questions
            .create(&alice, "what is X?")
            .await
            .expect("create");
        let app = actix_test::init_service(test_app(&ctx)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/question/edit/{}", question.id()))
            .insert_header(bearer(&bob))
            .set_json(json!({ "content": "hijacked" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["reason"], "ATHR-003");
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_delete_then_owner_edit_is_not_found(ctx: TestContext) {
        let alice = ctx.signin("alice").await;
        let admin = ctx.admin("admin").await;
        let question = ctx
            .questions
            .create(&alice, "what is X?")
            .await
            .expect("create");
        let app = actix_test::init_service(test_app(&ctx)).await;

        let delete = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/question/delete/{}", question.id()))
            .insert_header(bearer(&admin))
            .to_request();
        let response = actix_test::call_service(&app, delete).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = json_body(response).await;
        assert_eq!(value["id"], question.id().to_string());
        assert_eq!(value["status"], "QUESTION DELETED");

        let edit = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/question/edit/{}", question.id()))
            .insert_header(bearer(&alice))
            .set_json(json!({ "content": "still there?" }))
            .to_request();
        let response = actix_test::call_service(&app, edit).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["reason"], "QUES-001");
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_question_ids_are_not_found(ctx: TestContext) {
        let token = ctx.signin("alice").await;
        let app = actix_test::init_service(test_app(&ctx)).await;
        let request = actix_test::TestRequest::delete()
            .uri("/api/v1/question/delete/not-a-uuid")
            .insert_header(bearer(&token))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["reason"], "QUES-001");
    }

    #[rstest]
    #[actix_web::test]
    async fn list_by_user_filters_on_owner(ctx: TestContext) {
        let alice = ctx.signin("alice").await;
        let bob = ctx.signin("bob").await;
        ctx.questions.create(&alice, "mine").await.expect("create");
        ctx.questions.create(&bob, "theirs").await.expect("create");
        let alice_id = ctx.user_id("alice").await;
        let app = actix_test::init_service(test_app(&ctx)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/question/all/{alice_id}"))
            .insert_header(bearer(&bob))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = json_body(response).await;
        let contents: Vec<_> = value
            .as_array()
            .expect("array")
            .iter()
            .map(|q| q["content"].clone())
            .collect();
        assert_eq!(contents, vec![json!("mine")]);
    }

    #[rstest]
    #[case::delete(actix_test::TestRequest::delete().uri("/api/v1/question/delete/not-a-uuid"))]
    #[case::by_user(actix_test::TestRequest::get().uri("/api/v1/question/all/not-a-uuid"))]
    #[actix_web::test]
    async fn unknown_tokens_are_refused_before_id_parsing(
        ctx: TestContext,
        #[case] request: actix_test::TestRequest,
    ) {
        let app = actix_test::init_service(test_app(&ctx)).await;
        let request = request
            .insert_header(("authorization", "Bearer never-issued"))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["reason"], "ATHR-001");
    }
}
