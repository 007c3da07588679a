use crate::routes::api::v0::quiz::error::QuizError;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use shiken_model::quiz::quiz::{Quiz, QuizStructure};
use shiken_model::quiz::slot::Slot;
use shiken_model_tools::convert::IntoModel;
use tokio::try_join;
use utoipa::ToSchema;
use uuid::Uuid;

mod error;

pub(crate) fn create_router<S>(deletable: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let mut quiz_router = Router::new().route("/", get(get_quiz));
    if deletable {
        quiz_router = quiz_router.route("/", delete(delete_quiz));
    }
    let quiz_router = quiz_router
        .route("/slots", get(get_slots).post(add_slot))
        .route("/slots/{slot_id}", delete(remove_slot))
        .route("/slots/{slot_id}/move", post(move_slot))
        .route(
            "/breaks/{slot_number}",
            post(insert_page_break).delete(remove_page_break),
        )
        .route("/repaginate", post(repaginate));

    Router::new()
        .route("/", get(get_quizzes).post(create_quiz))
        .nest("/{quiz_id}", quiz_router)
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/quizzes",
    responses(
        (status = OK, body = Vec<Quiz>, description = "List of quizzes"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn get_quizzes(Extension(conn): Extension<DatabaseConnection>) -> Result<Response, QuizError> {
    let quizzes = shiken_db::quiz::Query::get_quizzes(&conn).await?;

    let models: Vec<Quiz> = quizzes.into_iter().map(IntoModel::into_model).collect();

    Ok(Json(models).into_response())
}

#[derive(Deserialize, ToSchema)]
pub(crate) struct CreateQuizRequest {
    name: String,
    questions_per_page: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/v0/quizzes",
    request_body = CreateQuizRequest,
    responses(
        (status = OK, body = Quiz, description = "The created quiz"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn create_quiz(
    Extension(conn): Extension<DatabaseConnection>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<Response, QuizError> {
    let quiz = shiken_db::quiz::Mutation::create_quiz(&conn, &payload.name, payload.questions_per_page.unwrap_or(0))
        .await?;

    let model: Quiz = quiz.into_model();
    Ok(Json(model).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/quizzes/{quiz_id}",
    responses(
        (status = OK, body = QuizStructure, description = "The quiz with its slots grouped into pages"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn get_quiz(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Response, QuizError> {
    let (quiz, slots) = try_join!(get_quiz_by_id(&conn, &quiz_id), get_slot_models(&conn, &quiz_id))?;

    let slots: Vec<&Slot> = slots.iter().collect();
    let structure = quiz.as_structure(slots);

    Ok(Json(structure).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v0/quizzes/{quiz_id}",
    responses(
        (status = OK, description = "Quiz and slots deleted"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn delete_quiz(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, QuizError> {
    shiken_db::quiz::Mutation::delete_quiz(&conn, &quiz_id).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v0/quizzes/{quiz_id}/slots",
    responses(
        (status = OK, body = Vec<Slot>, description = "The quiz's slots ordered by slot number"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn get_slots(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Response, QuizError> {
    let (_, slots) = try_join!(get_quiz_by_id(&conn, &quiz_id), get_slot_models(&conn, &quiz_id))?;

    Ok(Json(slots).into_response())
}

#[derive(Deserialize, ToSchema)]
pub(crate) struct AddSlotRequest {
    question_id: Uuid,
    /// Page to insert into. Omit it to append to the end of the quiz.
    page: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/v0/quizzes/{quiz_id}/slots",
    request_body = AddSlotRequest,
    responses(
        (status = OK, body = Slot, description = "The created slot"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn add_slot(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
    Json(payload): Json<AddSlotRequest>,
) -> Result<Response, QuizError> {
    let slot = shiken_db::slot::Mutation::add_slot(&conn, &quiz_id, &payload.question_id, payload.page).await?;

    let model: Slot = slot.into_model();
    Ok(Json(model).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v0/quizzes/{quiz_id}/slots/{slot_id}",
    responses(
        (status = OK, description = "Slot removed, ordinals and pages renumbered"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn remove_slot(
    Extension(conn): Extension<DatabaseConnection>,
    Path((quiz_id, slot_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, QuizError> {
    shiken_db::slot::Mutation::remove_slot(&conn, &quiz_id, &slot_id).await?;

    Ok(())
}

#[derive(Deserialize, ToSchema)]
pub(crate) struct MoveSlotRequest {
    /// The slot to move after. Omit it to move to the front of the quiz.
    after_slot_id: Option<Uuid>,
    page: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/v0/quizzes/{quiz_id}/slots/{slot_id}/move",
    request_body = MoveSlotRequest,
    responses(
        (status = OK, description = "Slot moved, ordinals and pages renumbered"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn move_slot(
    Extension(conn): Extension<DatabaseConnection>,
    Path((quiz_id, slot_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<MoveSlotRequest>,
) -> Result<impl IntoResponse, QuizError> {
    shiken_db::slot::Mutation::move_slot(&conn, &quiz_id, &slot_id, payload.after_slot_id, payload.page).await?;

    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v0/quizzes/{quiz_id}/breaks/{slot_number}",
    responses(
        (status = OK, description = "Page break inserted after the slot"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn insert_page_break(
    Extension(conn): Extension<DatabaseConnection>,
    Path((quiz_id, slot_number)): Path<(Uuid, i32)>,
) -> Result<impl IntoResponse, QuizError> {
    shiken_db::slot::Mutation::unlink_slots(&conn, &quiz_id, slot_number).await?;

    Ok(())
}

#[utoipa::path(
    delete,
    path = "/api/v0/quizzes/{quiz_id}/breaks/{slot_number}",
    responses(
        (status = OK, description = "Page break after the slot removed, the pages are merged"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn remove_page_break(
    Extension(conn): Extension<DatabaseConnection>,
    Path((quiz_id, slot_number)): Path<(Uuid, i32)>,
) -> Result<impl IntoResponse, QuizError> {
    shiken_db::slot::Mutation::link_slots(&conn, &quiz_id, slot_number).await?;

    Ok(())
}

#[derive(Deserialize, ToSchema)]
pub(crate) struct RepaginateRequest {
    /// Omit it to fall back to the quiz's questions_per_page. Zero puts
    /// the whole quiz on one page.
    slots_per_page: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/v0/quizzes/{quiz_id}/repaginate",
    request_body = RepaginateRequest,
    responses(
        (status = OK, description = "Slots evenly distributed over pages"),
    ),
    tag = "v0/quizzes"
)]
pub(crate) async fn repaginate(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
    Json(payload): Json<RepaginateRequest>,
) -> Result<impl IntoResponse, QuizError> {
    shiken_db::slot::Mutation::repaginate(&conn, &quiz_id, payload.slots_per_page).await?;

    Ok(())
}

async fn get_quiz_by_id(conn: &DatabaseConnection, quiz_id: &Uuid) -> Result<Quiz, QuizError> {
    let quiz = shiken_db::quiz::Query::get_quiz_by_id(conn, quiz_id)
        .await?
        .ok_or(QuizError::QuizNotFound)?
        .into_model();
    Ok(quiz)
}

async fn get_slot_models(conn: &DatabaseConnection, quiz_id: &Uuid) -> Result<Vec<Slot>, QuizError> {
    let slots = shiken_db::slot::Query::get_slots_by_quiz(conn, quiz_id).await?;
    Ok(slots.into_iter().map(IntoModel::into_model).collect())
}
