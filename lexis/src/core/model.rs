use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An addressable, titled span of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Chunk {
    /// Unique within a document and derived from the chunk's position, so
    /// re-segmenting identical text yields identical ids.
    pub id: String,

    /// A detected structural heading, or a synthesized placeholder when the
    /// chunk came from fallback segmentation.
    pub title: String,

    /// The full text span, including its own heading when one was detected,
    /// so the chunk is self-describing when read standalone.
    pub content: String,
}

impl Chunk {
    pub fn new(id: String, title: String, content: String) -> Self {
        Self { id, title, content }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// A single turn in the active session's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// A segmented document as persisted in the library.
///
/// Documents are keyed by file name; saving under an existing name replaces
/// the stored document wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StoredDocument {
    pub name: String,
    pub chunks: Vec<Chunk>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    pub fn short(&self) -> DocumentShort {
        DocumentShort {
            name: self.name.clone(),
            chunks: self.chunks.len(),
            updated_at: self.updated_at,
        }
    }
}

/// Library listing entry.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DocumentShort {
    pub name: String,
    pub chunks: usize,
    pub updated_at: DateTime<Utc>,
}
