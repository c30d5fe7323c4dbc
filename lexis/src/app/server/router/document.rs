use crate::{
    app::{
        server::dto::{ChatSnapshot, ProcessResult},
        state::AppState,
    },
    core::{
        model::{DocumentShort, StoredDocument},
        service::document::dto::DocumentProcess,
        session::{library_greeting, processed_greeting},
    },
    err,
    error::LexisError,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

#[utoipa::path(
    get,
    path = "/documents",
    responses(
        (status = 200, description = "List the library, most recently updated first", body = Vec<DocumentShort>),
        (status = 500, description = "Internal server error")
    )
)]
pub(in crate::app::server) async fn list_documents(
    state: State<AppState>,
) -> Result<impl IntoResponse, LexisError> {
    let documents = state.services.document.list_documents().await?;
    let documents = documents
        .iter()
        .map(StoredDocument::short)
        .collect::<Vec<_>>();
    Ok(Json(documents))
}

#[utoipa::path(
    get,
    path = "/documents/{name}",
    responses(
        (status = 200, description = "Get a document from the library", body = StoredDocument),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("name" = String, Path, description = "Document file name")
    )
)]
pub(in crate::app::server) async fn get_document(
    state: State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, LexisError> {
    let document = state.services.document.get_document(&name).await?;
    Ok(Json(document))
}

#[utoipa::path(
    post,
    path = "/documents",
    responses(
        (status = 200, description = "Process an uploaded document and open its session", body = ProcessResult),
        (status = 422, description = "Invalid input"),
        (status = 500, description = "Internal server error")
    ),
    request_body = axum::extract::Multipart
)]
pub(in crate::app::server) async fn upload_document(
    state: State<AppState>,
    mut form: Multipart,
) -> Result<Json<ProcessResult>, LexisError> {
    while let Ok(Some(field)) = form.next_field().await {
        let Some(name) = field.file_name() else {
            continue;
        };

        let name = name.to_string();

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("error in form: {e}");
                continue;
            }
        };

        let text = String::from_utf8_lossy(&bytes);

        let document = state
            .services
            .document
            .process(DocumentProcess::new(name, &text))
            .await?;

        let greeting = processed_greeting(&document.name, document.chunks.len());

        let mut session = state.session.lock().await;
        session.open(&document.name, document.chunks.clone(), greeting.clone());

        return Ok(Json(ProcessResult {
            document: document.short(),
            greeting,
        }));
    }

    err!(InvalidFileName, "No file found in form")
}

#[utoipa::path(
    post,
    path = "/documents/{name}/open",
    responses(
        (status = 200, description = "Open a stored document's session", body = ChatSnapshot),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("name" = String, Path, description = "Document file name")
    )
)]
pub(in crate::app::server) async fn open_document(
    state: State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, LexisError> {
    let document = state.services.document.get_document(&name).await?;

    let greeting = library_greeting(&document.name);

    let mut session = state.session.lock().await;
    session.open(&document.name, document.chunks, greeting);

    Ok(Json(ChatSnapshot::from(&*session)))
}

#[utoipa::path(
    delete,
    path = "/documents/{name}",
    responses(
        (status = 204, description = "Delete a document from the library"),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("name" = String, Path, description = "Document file name")
    )
)]
pub(in crate::app::server) async fn delete_document(
    state: State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, LexisError> {
    state.services.document.delete(&name).await?;

    // Deleting the active document closes its session.
    let mut session = state.session.lock().await;
    if session.document.as_deref() == Some(name.as_str()) {
        session.close();
    }

    Ok(StatusCode::NO_CONTENT)
}
