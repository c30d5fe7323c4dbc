use crate::{
    app::{
        server::dto::{AskPayload, AskResult, ChatSnapshot},
        state::AppState,
    },
    error::LexisError,
    map_err,
};
use axum::{extract::State, response::IntoResponse, Json};
use validify::Validify;

#[utoipa::path(
    post,
    path = "/chat",
    responses(
        (status = 200, description = "Answer a question against the active document", body = AskResult),
        (status = 404, description = "No active document session"),
        (status = 409, description = "A previous question is still being answered"),
        (status = 422, description = "Invalid input"),
        (status = 500, description = "Internal server error")
    ),
    request_body = AskPayload
)]
pub(in crate::app::server) async fn ask(
    state: State<AppState>,
    Json(mut payload): Json<AskPayload>,
) -> Result<Json<AskResult>, LexisError> {
    map_err!(payload.validify());

    let provider = payload
        .provider
        .as_deref()
        .unwrap_or(&state.default_provider);

    let mut session = state.session.lock().await;

    let message = state
        .services
        .chat
        .ask(&mut session, provider, payload.question.clone())
        .await?;

    Ok(Json(AskResult {
        message,
        references: session.references.clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/chat",
    responses(
        (status = 200, description = "Get the active session", body = ChatSnapshot),
        (status = 500, description = "Internal server error")
    )
)]
pub(in crate::app::server) async fn chat_snapshot(
    state: State<AppState>,
) -> Result<impl IntoResponse, LexisError> {
    let session = state.session.lock().await;
    Ok(Json(ChatSnapshot::from(&*session)))
}

#[utoipa::path(
    delete,
    path = "/chat",
    responses(
        (status = 200, description = "Close the active session", body = ChatSnapshot),
        (status = 500, description = "Internal server error")
    )
)]
pub(in crate::app::server) async fn close_session(
    state: State<AppState>,
) -> Result<impl IntoResponse, LexisError> {
    let mut session = state.session.lock().await;
    session.close();
    Ok(Json(ChatSnapshot::from(&*session)))
}
