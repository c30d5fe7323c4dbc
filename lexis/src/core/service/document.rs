use crate::{
    core::{model::StoredDocument, segment::Segmenter, store::DocumentStore},
    err,
    error::LexisError,
    map_err,
};
use dto::DocumentProcess;
use std::sync::Arc;
use tracing::info;
use validify::Validify;

/// High level operations for the document library.
#[derive(Clone)]
pub struct DocumentService<S> {
    store: S,
    segmenter: Arc<Segmenter>,
}

impl<S> DocumentService<S>
where
    S: DocumentStore + Send + Sync,
{
    pub fn new(store: S, segmenter: Arc<Segmenter>) -> Self {
        Self { store, segmenter }
    }

    /// Segment extracted text and persist the result, replacing any
    /// document already stored under the same name.
    ///
    /// An empty chunk sequence is a valid outcome for degenerate input;
    /// there is nothing to chat about then, but processing is not an error.
    pub async fn process(&self, mut params: DocumentProcess<'_>) -> Result<StoredDocument, LexisError> {
        map_err!(params.validify());

        let DocumentProcess { ref name, text } = params;

        let chunks = self.segmenter.segment(text)?;

        info!("Processed '{name}' into {} chunk(s)", chunks.len());

        self.store.save(name, &chunks).await
    }

    /// Get a document from the library.
    ///
    /// * `name`: Document file name.
    pub async fn get_document(&self, name: &str) -> Result<StoredDocument, LexisError> {
        match self.store.get(name).await? {
            Some(document) => Ok(document),
            None => err!(DoesNotExist, "Document '{name}'"),
        }
    }

    /// List the library, most recently updated first.
    pub async fn list_documents(&self) -> Result<Vec<StoredDocument>, LexisError> {
        let mut documents = self.store.list().await?;
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(documents)
    }

    /// Remove a document from the library.
    ///
    /// * `name`: Document file name.
    pub async fn delete(&self, name: &str) -> Result<(), LexisError> {
        self.get_document(name).await?;
        self.store.delete(name).await
    }
}

/// Document service DTOs.
pub mod dto {
    use validify::Validify;

    #[derive(Debug, Validify)]
    pub struct DocumentProcess<'a> {
        /// Document file name, the library key.
        #[modify(trim)]
        #[validate(length(min = 1, message = "Document name cannot be empty."))]
        pub name: String,

        /// Extracted document text, pages concatenated in page order,
        /// separated by blank lines.
        pub text: &'a str,
    }

    impl<'a> DocumentProcess<'a> {
        pub fn new(name: String, text: &'a str) -> Self {
            Self { name, text }
        }
    }
}
