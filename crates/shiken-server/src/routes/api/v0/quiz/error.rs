use axum::response::{IntoResponse, Response};
use http::StatusCode;
use sea_orm::DbErr;
use shiken_core::layout::error::LayoutError;
use shiken_db::error::StructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum QuizError {
    #[error("The requested quiz was not found.")]
    QuizNotFound,

    #[error("The requested slot was not found.")]
    SlotNotFound,

    #[error("Page {0} is outside the quiz.")]
    InvalidPage(i32),

    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for QuizError {
    fn from(error: DbErr) -> Self {
        match error {
            DbErr::RecordNotFound(_) => Self::QuizNotFound,
            error => Self::Database(error),
        }
    }
}

impl From<StructureError> for QuizError {
    fn from(error: StructureError) -> Self {
        match error {
            StructureError::Layout(LayoutError::InvalidPage(page)) => Self::InvalidPage(page),
            StructureError::Layout(_) => Self::SlotNotFound,
            StructureError::Database(error) => error.into(),
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        match self {
            QuizError::QuizNotFound => (StatusCode::NOT_FOUND, "Quiz not found").into_response(),
            QuizError::SlotNotFound => (StatusCode::NOT_FOUND, "Slot not found").into_response(),
            QuizError::InvalidPage(page) => {
                (StatusCode::BAD_REQUEST, format!("Page {page} is outside the quiz")).into_response()
            }
            QuizError::Database(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}")).into_response()
            }
        }
    }
}
