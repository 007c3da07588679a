use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use shiken_entity::quiz::quiz::{self, Entity as Quiz, Model as QuizModel};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_quizzes<C: ConnectionTrait>(conn: &C) -> Result<Vec<QuizModel>, DbErr> {
        Quiz::find()
            .order_by_asc(quiz::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load quizzes"))
    }

    pub async fn get_quiz_by_id<C: ConnectionTrait>(conn: &C, quiz_id: &Uuid) -> Result<Option<QuizModel>, DbErr> {
        Quiz::find()
            .filter(quiz::Column::Id.eq(*quiz_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %quiz_id, "failed to load quiz by id");
            })
    }
}
