use crate::util::FlattenTransactionResultExt;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use shiken_entity::quiz::quiz::{self, Entity as QuizEntity, Model as QuizModel};
use shiken_entity::quiz::slot::{self, Entity as SlotEntity};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_quiz<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        questions_per_page: i32,
    ) -> Result<QuizModel, DbErr> {
        let quiz = quiz::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            questions_per_page: Set(questions_per_page.max(0)),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };

        quiz.insert(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, name, "failed to create quiz"))
    }

    /// Delete a quiz and all of its slots in one transaction.
    pub async fn delete_quiz<C: ConnectionTrait + TransactionTrait>(conn: &C, quiz_id: &Uuid) -> Result<(), DbErr> {
        let quiz_id = *quiz_id;
        conn.transaction(|conn| {
            Box::pin(async move {
                SlotEntity::delete_many()
                    .filter(slot::Column::QuizId.eq(quiz_id))
                    .exec(conn)
                    .await?;

                let result = QuizEntity::delete_by_id(quiz_id).exec(conn).await?;
                if result.rows_affected == 0 {
                    return Err(DbErr::RecordNotFound("quiz not found".to_string()));
                }
                Ok(())
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %quiz_id, "failed to delete quiz"))
    }
}
