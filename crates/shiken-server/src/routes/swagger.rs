use super::api;

use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::quiz::get_quizzes,
        api::v0::quiz::create_quiz,
        api::v0::quiz::get_quiz,
        api::v0::quiz::delete_quiz,
        api::v0::quiz::get_slots,
        api::v0::quiz::add_slot,
        api::v0::quiz::remove_slot,
        api::v0::quiz::move_slot,
        api::v0::quiz::insert_page_break,
        api::v0::quiz::remove_page_break,
        api::v0::quiz::repaginate,
    ),
    tags()
)]
struct ApiDoc;

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // There is no need to create `RapiDoc::with_openapi` because the OpenApi is served
        // via SwaggerUi instead we only make rapidoc to point to the existing doc.
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
}
