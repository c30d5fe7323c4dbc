use crate::{
    core::model::{Chunk, StoredDocument},
    error::LexisError,
};

/// Persists segmented documents, keyed by file name.
/// Serves as indirection to decouple the library from its backing storage.
#[async_trait::async_trait]
pub trait DocumentStore {
    fn id(&self) -> &'static str;

    /// Persist `chunks` under `name`, replacing any existing document with
    /// that name wholesale.
    async fn save(&self, name: &str, chunks: &[Chunk]) -> Result<StoredDocument, LexisError>;

    /// Get a document by name, if it exists.
    async fn get(&self, name: &str) -> Result<Option<StoredDocument>, LexisError>;

    /// Delete a document by name.
    async fn delete(&self, name: &str) -> Result<(), LexisError>;

    /// List all stored documents.
    async fn list(&self) -> Result<Vec<StoredDocument>, LexisError>;
}
