//! Http specific DTOs.

use crate::core::{
    model::{ChatMessage, Chunk, DocumentShort},
    session::Session,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validify::Validify;

#[derive(Debug, Deserialize, Validify, ToSchema)]
pub(super) struct AskPayload {
    /// The question to answer.
    #[modify(trim)]
    #[validate(length(min = 1, message = "Question cannot be empty."))]
    pub question: String,

    /// Interpreter backend to use. Falls back to the configured default
    /// when omitted.
    pub provider: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(super) struct AskResult {
    /// The model's turn for this question.
    pub message: ChatMessage,

    /// The chunks the answer was grounded on.
    pub references: Vec<Chunk>,
}

/// Full view of the active session.
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct ChatSnapshot {
    pub document: Option<String>,
    pub history: Vec<ChatMessage>,
    pub references: Vec<Chunk>,
}

impl From<&Session> for ChatSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            document: session.document.clone(),
            history: session.history.clone(),
            references: session.references.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(super) struct ProcessResult {
    /// The document as stored in the library.
    pub document: DocumentShort,

    /// Greeting opening the document's session.
    pub greeting: String,
}
