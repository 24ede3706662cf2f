//! PostgreSQL-backed `AnswerRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AnswerPersistenceError, AnswerRepository};
use crate::domain::{Answer, AnswerId, Content, QuestionId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AnswerRow, NewAnswerRow};
use super::pool::{DbPool, PoolError};
use super::schema::answers;

/// Diesel-backed implementation of the `AnswerRepository` port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AnswerPersistenceError {
    map_pool_error(error, AnswerPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AnswerPersistenceError {
    map_diesel_error(
        error,
        AnswerPersistenceError::query,
        AnswerPersistenceError::connection,
    )
}

fn row_to_answer(row: AnswerRow) -> Result<Answer, AnswerPersistenceError> {
    let content = Content::new(row.content).map_err(|_| {
        warn!(answer_id = %row.id, "stored answer has blank content");
        AnswerPersistenceError::query("stored answer has invalid content")
    })?;
    Ok(Answer::new(
        AnswerId::from_uuid(row.id),
        content,
        row.created_at,
        QuestionId::from_uuid(row.question_id),
        UserId::from_uuid(row.owner_id),
    ))
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewAnswerRow {
            id: *answer.id().as_uuid(),
            content: answer.content().as_ref(),
            question_id: *answer.question_id().as_uuid(),
            owner_id: *answer.owner().as_uuid(),
            created_at: answer.created_at(),
        };
        diesel::insert_into(answers::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<AnswerRow> = answers::table
            .filter(answers::id.eq(*id.as_uuid()))
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_answer).transpose()
    }

    async fn update(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(answers::table.filter(answers::id.eq(*answer.id().as_uuid())))
            .set(answers::content.eq(answer.content().as_ref()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn delete(&self, id: &AnswerId) -> Result<bool, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(answers::table.filter(answers::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::question_id.eq(*question_id.as_uuid()))
            .select(AnswerRow::as_select())
            .order(answers::seq.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_answer).collect()
    }
}
