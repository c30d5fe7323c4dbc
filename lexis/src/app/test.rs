//! Test suites and utilites.

mod document;

use super::document::store::FsDocumentStore;
use crate::core::{segment::Segmenter, service::document::DocumentService};
use std::sync::Arc;

pub struct TestStateConfig {
    pub fs_store_path: String,
}

pub struct TestState {
    pub document: DocumentService<FsDocumentStore>,
}

impl TestState {
    pub async fn init(config: TestStateConfig) -> Self {
        let store = FsDocumentStore::new(&config.fs_store_path);
        let segmenter = Arc::new(Segmenter::new().unwrap());

        TestState {
            document: DocumentService::new(store, segmenter),
        }
    }
}
