//! Answer API handlers.
//!
//! ```text
//! POST   /api/v1/question/{questionId}/answer/create {"answer":"X is Y"}
//! PUT    /api/v1/answer/edit/{answerId} {"content":"X is Z"}
//! DELETE /api/v1/answer/delete/{answerId}
//! GET    /api/v1/answer/all/{questionId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Answer;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{answer_path_id, question_path_id};

/// Body for posting an answer.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AnswerRequest {
    #[schema(example = "X is Y")]
    pub answer: String,
}

/// Body for editing an answer.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AnswerEditRequest {
    #[schema(example = "X is Z")]
    pub content: String,
}

/// Outcome of an answer write.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AnswerResponse {
    pub id: Uuid,
    #[schema(example = "ANSWER CREATED")]
    pub status: String,
}

impl AnswerResponse {
    fn new(answer: &Answer, status: &str) -> Self {
        Self {
            id: *answer.id().as_uuid(),
            status: status.to_owned(),
        }
    }
}

/// An answer as listed to clients.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetailsResponse {
    pub id: Uuid,
    pub question_id: Uuid,
    pub answer_content: String,
}

impl From<Answer> for AnswerDetailsResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: *answer.id().as_uuid(),
            question_id: *answer.question_id().as_uuid(),
            answer_content: answer.content().to_string(),
        }
    }
}

/// Answer an existing question.
#[utoipa::path(
    post,
    path = "/api/v1/question/{question_id}/answer/create",
    params(("question_id" = String, Path, description = "Question being answered")),
    request_body = AnswerRequest,
    responses(
        (status = 201, description = "Answer created", body = AnswerResponse),
        (status = 400, description = "Blank content", body = ErrorSchema),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 404, description = "Unknown question (QUES-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "createAnswer"
)]
#[post("/question/{question_id}/answer/create")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    payload: web::Json<AnswerRequest>,
) -> ApiResult<HttpResponse> {
    let question_id = question_path_id(&state, token.token(), &path.into_inner()).await?;
    let answer = state
        .answers
        .create(token.token(), &question_id, &payload.answer)
        .await?;
    Ok(HttpResponse::Created().json(AnswerResponse::new(&answer, "ANSWER CREATED")))
}

/// Replace an answer's content. Only the owner may edit.
#[utoipa::path(
    put,
    path = "/api/v1/answer/edit/{answer_id}",
    params(("answer_id" = String, Path, description = "Answer identifier")),
    request_body = AnswerEditRequest,
    responses(
        (status = 200, description = "Answer edited", body = AnswerResponse),
        (status = 400, description = "Blank content", body = ErrorSchema),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 403, description = "Not the owner (ATHR-003)", body = ErrorSchema),
        (status = 404, description = "Unknown answer (ANS-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "editAnswer"
)]
#[put("/answer/edit/{answer_id}")]
pub async fn edit_answer(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    payload: web::Json<AnswerEditRequest>,
) -> ApiResult<web::Json<AnswerResponse>> {
    let id = answer_path_id(&state, token.token(), &path.into_inner()).await?;
    let answer = state
        .answers
        .edit(token.token(), &id, &payload.content)
        .await?;
    Ok(web::Json(AnswerResponse::new(&answer, "ANSWER EDITED")))
}

/// Remove an answer. Owners and administrators may delete.
#[utoipa::path(
    delete,
    path = "/api/v1/answer/delete/{answer_id}",
    params(("answer_id" = String, Path, description = "Answer identifier")),
    responses(
        (status = 200, description = "Answer deleted", body = AnswerResponse),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 403, description = "Neither owner nor admin (ATHR-003)", body = ErrorSchema),
        (status = 404, description = "Unknown answer (ANS-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "deleteAnswer"
)]
#[delete("/answer/delete/{answer_id}")]
pub async fn delete_answer(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<AnswerResponse>> {
    let id = answer_path_id(&state, token.token(), &path.into_inner()).await?;
    let answer = state.answers.delete(token.token(), &id).await?;
    Ok(web::Json(AnswerResponse::new(&answer, "ANSWER DELETED")))
}

/// List the answers to one question in the order they were posted.
#[utoipa::path(
    get,
    path = "/api/v1/answer/all/{question_id}",
    params(("question_id" = String, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Answers", body = [AnswerDetailsResponse]),
        (status = 401, description = "No active session", body = ErrorSchema),
        (status = 404, description = "Unknown question (QUES-001)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "listAnswers"
)]
#[get("/answer/all/{question_id}")]
pub async fn list_answers(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AnswerDetailsResponse>>> {
    let question_id = question_path_id(&state, token.token(), &path.into_inner()).await?;
    let answers = state
        .answers_query
        .list_for_question(token.token(), &question_id)
        .await?;
    Ok(web::Json(answers.into_iter().map(Into::into).collect()))
}
