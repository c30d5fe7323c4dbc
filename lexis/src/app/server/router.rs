use super::api::ApiDoc;
use crate::{
    app::state::{AppConfig, AppState},
    error::LexisError,
};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, cors::CorsLayer, trace::TraceLayer};
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub(super) mod chat;
pub(super) mod document;

pub fn router(state: AppState, origins: Vec<String>) -> Router {
    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
    } else {
        let origins = origins
            .into_iter()
            .map(|origin| {
                tracing::info!("Adding {origin} to allowed origins");
                HeaderValue::from_str(&origin)
            })
            .map(Result::unwrap);

        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::list(origins))
            .allow_headers(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
    };

    use chat::*;
    use document::*;

    let router = Router::new()
        .route("/documents", get(list_documents))
        .route("/documents", post(upload_document))
        .layer(DefaultBodyLimit::max(50_000_000))
        .route("/documents/:name", get(get_document))
        .route("/documents/:name", delete(delete_document))
        .route("/documents/:name/open", post(open_document))
        .route("/chat", get(chat_snapshot))
        .route("/chat", post(ask))
        .route("/chat", delete(close_session))
        .route("/info", get(app_config))
        .with_state(state);

    router
        .layer(
            TraceLayer::new_for_http()
                .on_request(|req: &axum::http::Request<_>, _span: &Span| {
                    let ctype = req
                        .headers()
                        .get("content-type")
                        .map(|v| v.to_str().unwrap_or_else(|_| "none"))
                        .unwrap_or_else(|| "none");

                    tracing::info!("Processing request | content-type: {ctype}");
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                        let status = res.status();
                        let ctype = res
                            .headers()
                            .get("content-type")
                            .map(|v| v.to_str().unwrap_or_else(|_| "none"))
                            .unwrap_or_else(|| "none");

                        tracing::info!(
                            "Sending response | {status} | {}ms | {ctype}",
                            latency.as_millis()
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        tracing::error!("Error in request: {error}")
                    },
                ),
        )
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Has to go last to exclude all the tracing/cors layers
        .route("/_health", get(health_check))
}

async fn health_check() -> impl IntoResponse {
    "OK"
}

#[utoipa::path(
    get,
    path = "/info",
    responses(
        (status = 200, description = "Get app configuration and available providers", body = AppConfig),
        (status = 500, description = "Internal server error")
    )
)]
pub(super) async fn app_config(
    state: State<AppState>,
) -> Result<impl IntoResponse, LexisError> {
    Ok(Json(state.get_configuration()?))
}
