#[rustfmt::skip]
use super::router::{
    // App config
    __path_app_config,
    // Chat
    chat::{__path_ask, __path_chat_snapshot, __path_close_session},
    // Documents
    document::{
        __path_delete_document,
        __path_get_document,
        __path_list_documents,
        __path_open_document,
        __path_upload_document,
    },
};
use super::dto::{AskPayload, AskResult, ChatSnapshot, ProcessResult};
use crate::{
    app::state::AppConfig,
    core::model::{ChatMessage, ChatRole, Chunk, DocumentShort, StoredDocument},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // App config
        app_config,
        // Documents
        list_documents,
        get_document,
        upload_document,
        open_document,
        delete_document,
        // Chat
        ask,
        chat_snapshot,
        close_session,
    ),
    components(schemas(
        Chunk,
        ChatRole,
        ChatMessage,
        StoredDocument,
        DocumentShort,
        AskPayload,
        AskResult,
        ChatSnapshot,
        ProcessResult,
        AppConfig,
    ))
)]
pub struct ApiDoc;
