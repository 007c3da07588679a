use crate::routes;
use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayerBuilder;
use http::{HeaderValue, Method, header};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub(crate) fn create_app(origins: Vec<String>, deletable: bool, conn: DatabaseConnection) -> anyhow::Result<Router> {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("api")
        .with_default_metrics()
        .build_pair();

    let api_cors = CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .map(|origin| origin.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/quizzes", routes::api::v0::quiz::create_router(deletable))
                .layer(api_cors),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(prometheus_layer)
                .layer(TraceLayer::new_for_http())
                .layer(Extension(conn)),
        )
        .with_state(());
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_app(deletable: bool) -> Router {
        let conn = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        shiken_db::migration::migrate(&conn).await.unwrap();
        create_app(Vec::new(), deletable, conn).unwrap()
    }

    #[tokio::test]
    async fn test_list_quizzes_responds() {
        let app = test_app(false).await;
        let response = app
            .oneshot(Request::builder().uri("/api/v0/quizzes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_quiz_deletion_is_opt_in() {
        let uri = format!("/api/v0/quizzes/{}", uuid::Uuid::new_v4());
        let request = |uri: &str| {
            Request::builder()
                .method(http::Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        };

        let locked = test_app(false).await.oneshot(request(&uri)).await.unwrap();
        assert_eq!(locked.status(), StatusCode::METHOD_NOT_ALLOWED);

        let unlocked = test_app(true).await.oneshot(request(&uri)).await.unwrap();
        assert_eq!(unlocked.status(), StatusCode::NOT_FOUND);
    }
}
