//! Path parameter parsing for inbound HTTP adapters.
//!
//! A path segment that is not a UUID can never name a stored entity, so it
//! reads as "not found" with the entity's stable reason code. The caller's
//! session is checked before that rejection is returned, so a bad token
//! always reports ATHR-001 or ATHR-002 first.

use crate::domain::{AccessToken, AnswerId, Error, QuestionId, ReasonCode, UserId};
use crate::inbound::http::state::HttpState;

fn parse_question_id(raw: &str) -> Result<QuestionId, Error> {
    QuestionId::new(raw).map_err(|_| {
        Error::rejected(
            ReasonCode::QuestionNotFound,
            "Entered question uuid does not exist",
        )
    })
}

fn parse_answer_id(raw: &str) -> Result<AnswerId, Error> {
    AnswerId::new(raw).map_err(|_| {
        Error::rejected(
            ReasonCode::AnswerNotFound,
            "Entered answer uuid does not exist",
        )
    })
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::rejected(
            ReasonCode::UserNotFound,
            "User with entered uuid does not exist",
        )
    })
}

/// Well-formed ids pass straight through; the service checks the session.
async fn after_session_check<T>(
    state: &HttpState,
    token: &AccessToken,
    parsed: Result<T, Error>,
) -> Result<T, Error> {
    match parsed {
        Ok(id) => Ok(id),
        Err(not_found) => {
            state.accounts.authenticate(token).await?;
            Err(not_found)
        }
    }
}

pub(crate) async fn question_path_id(
    state: &HttpState,
    token: &AccessToken,
    raw: &str,
) -> Result<QuestionId, Error> {
    after_session_check(state, token, parse_question_id(raw)).await
}

pub(crate) async fn answer_path_id(
    state: &HttpState,
    token: &AccessToken,
    raw: &str,
) -> Result<AnswerId, Error> {
    after_session_check(state, token, parse_answer_id(raw)).await
}

pub(crate) async fn user_path_id(
    state: &HttpState,
    token: &AccessToken,
    raw: &str,
) -> Result<UserId, Error> {
    after_session_check(state, token, parse_user_id(raw)).await
}
