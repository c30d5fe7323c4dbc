use crate::{
    core::{
        model::{Chunk, StoredDocument},
        store::DocumentStore,
    },
    err,
    error::LexisError,
    map_err,
};
use std::{path::PathBuf, str::FromStr};
use tracing::{debug, error, info};

/// Simple fs based implementation of a [DocumentStore].
///
/// One JSON file per document, named after the document with a `.json`
/// extension. Saving is a full replace, mirroring the keyed-map semantics
/// of the library.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    /// The base directory to store the documents in.
    base: PathBuf,
}

impl FsDocumentStore {
    pub fn new(path: &str) -> Self {
        std::fs::create_dir_all(path).expect("unable to create library directory");

        let base = PathBuf::from_str(path)
            .expect("invalid path")
            .canonicalize()
            .expect("unable to canonicalize");

        info!("Initialising fs library at {}", base.display());

        Self { base }
    }

    fn document_path(&self, name: &str) -> Result<PathBuf, LexisError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return err!(InvalidFileName, "{name}");
        }
        Ok(self.base.join(format!("{name}.json")))
    }
}

#[async_trait::async_trait]
impl DocumentStore for FsDocumentStore {
    fn id(&self) -> &'static str {
        "fs"
    }

    async fn save(&self, name: &str, chunks: &[Chunk]) -> Result<StoredDocument, LexisError> {
        let path = self.document_path(name)?;

        let document = StoredDocument {
            name: name.to_string(),
            chunks: chunks.to_vec(),
            updated_at: chrono::Utc::now(),
        };

        let json = map_err!(serde_json::to_vec_pretty(&document));

        debug!("Writing {}", path.display());
        map_err!(tokio::fs::write(&path, json).await);

        Ok(document)
    }

    async fn get(&self, name: &str) -> Result<Option<StoredDocument>, LexisError> {
        let path = self.document_path(name)?;

        let file = match tokio::fs::read(&path).await {
            Ok(file) => file,
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => return Ok(None),
                _ => return Err(map_err!(Err(e))),
            },
        };

        Ok(Some(map_err!(serde_json::from_slice(&file))))
    }

    async fn delete(&self, name: &str) -> Result<(), LexisError> {
        let path = self.document_path(name)?;
        debug!("Removing {}", path.display());
        Ok(map_err!(tokio::fs::remove_file(&path).await))
    }

    async fn list(&self) -> Result<Vec<StoredDocument>, LexisError> {
        let mut documents = vec![];

        let mut files = map_err!(tokio::fs::read_dir(&self.base).await);

        while let Some(file) = map_err!(files.next_entry().await) {
            let path = file.path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let file = map_err!(tokio::fs::read(&path).await);

            match serde_json::from_slice::<StoredDocument>(&file) {
                Ok(document) => documents.push(document),
                Err(e) => error!("Skipping malformed entry {}: {e}", path.display()),
            }
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIR: &str = "__fs_library_tests";

    fn chunk(id: &str) -> Chunk {
        Chunk::new(
            id.to_string(),
            "Artigo 1.º".to_string(),
            "Artigo 1.º\ncorpo".to_string(),
        )
    }

    #[tokio::test]
    async fn works() {
        let _ = tokio::fs::remove_dir_all(DIR).await;
        tokio::fs::create_dir(DIR).await.unwrap();

        let store = FsDocumentStore::new(DIR);

        let chunks = vec![chunk("chunk-artigo-0"), chunk("chunk-artigo-1")];

        let saved = store.save("lei", &chunks).await.unwrap();
        assert_eq!(chunks, saved.chunks);

        let read = store.get("lei").await.unwrap().unwrap();
        assert_eq!(saved, read);

        // Full replace semantics.
        let replacement = vec![chunk("chunk-0")];
        store.save("lei", &replacement).await.unwrap();

        let read = store.get("lei").await.unwrap().unwrap();
        assert_eq!(replacement, read.chunks);

        let listed = store.list().await.unwrap();
        assert_eq!(1, listed.len());

        store.delete("lei").await.unwrap();
        assert!(store.get("lei").await.unwrap().is_none());

        tokio::fs::remove_dir_all(DIR).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_path_traversal_names() {
        let _ = tokio::fs::remove_dir_all("__fs_library_tests_names").await;
        tokio::fs::create_dir("__fs_library_tests_names")
            .await
            .unwrap();

        let store = FsDocumentStore::new("__fs_library_tests_names");

        assert!(store.get("../lei").await.is_err());
        assert!(store.get("").await.is_err());
        assert!(store.get(".hidden").await.is_err());

        tokio::fs::remove_dir_all("__fs_library_tests_names")
            .await
            .unwrap();
    }
}
