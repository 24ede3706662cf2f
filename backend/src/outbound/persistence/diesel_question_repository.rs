//! PostgreSQL-backed `QuestionRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{QuestionPersistenceError, QuestionRepository};
use crate::domain::{Content, Question, QuestionId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewQuestionRow, QuestionRow};
use super::pool::{DbPool, PoolError};
use super::schema::questions;

/// Diesel-backed implementation of the `QuestionRepository` port.
///
/// Listings are ordered by the table's `seq` column, which records
/// insertion order independently of `created_at` precision.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        owner: Option<&UserId>,
    ) -> Result<Vec<Question>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = questions::table
            .select(QuestionRow::as_select())
            .order(questions::seq.asc())
            .into_boxed();
        if let Some(owner) = owner {
            query = query.filter(questions::owner_id.eq(*owner.as_uuid()));
        }
        let rows: Vec<QuestionRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_question).collect()
    }
}

fn pool_error(error: PoolError) -> QuestionPersistenceError {
    map_pool_error(error, QuestionPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> QuestionPersistenceError {
    map_diesel_error(
        error,
        QuestionPersistenceError::query,
        QuestionPersistenceError::connection,
    )
}

fn row_to_question(row: QuestionRow) -> Result<Question, QuestionPersistenceError> {
    let content = Content::new(row.content).map_err(|_| {
        warn!(question_id = %row.id, "stored question has blank content");
        QuestionPersistenceError::query("stored question has invalid content")
    })?;
    Ok(Question::new(
        QuestionId::from_uuid(row.id),
        content,
        row.created_at,
        UserId::from_uuid(row.owner_id),
    ))
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewQuestionRow {
            id: *question.id().as_uuid(),
            content: question.content().as_ref(),
            owner_id: *question.owner().as_uuid(),
            created_at: question.created_at(),
        };
        diesel::insert_into(questions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<QuestionRow> = questions::table
            .filter(questions::id.eq(*id.as_uuid()))
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_question).transpose()
    }

    async fn update(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // A concurrent delete leaves nothing to update; last write wins otherwise.
        diesel::update(questions::table.filter(questions::id.eq(*question.id().as_uuid())))
            .set(questions::content.eq(question.content().as_ref()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn delete(&self, id: &QuestionId) -> Result<bool, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(questions::table.filter(questions::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn list_all(&self) -> Result<Vec<Question>, QuestionPersistenceError> {
        self.load(None).await
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Question>, QuestionPersistenceError> {
        self.load(Some(owner)).await
    }
}
