use crate::core::model::{ChatMessage, ChatRole};
use lexis_interpreters::{HistoryMessage, HistoryRole};

/// Google Gemini backend.
pub mod gemini;

/// Groq backend.
pub mod groq;

/// Self-hosted Ollama backend.
pub mod ollama;

pub(super) fn map_history(history: &[ChatMessage]) -> Vec<HistoryMessage> {
    history
        .iter()
        .map(|msg| HistoryMessage {
            role: match msg.role {
                ChatRole::User => HistoryRole::User,
                ChatRole::Model => HistoryRole::Assistant,
            },
            content: msg.content.clone(),
        })
        .collect()
}
