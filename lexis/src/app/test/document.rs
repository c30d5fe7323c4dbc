#[cfg(test)]
#[suitest::suite(integration_tests)]
#[suitest::suite_cfg(sequential = true)]
mod document_service_integration_tests {
    use crate::{
        app::test::{TestState, TestStateConfig},
        core::service::document::dto::DocumentProcess,
        error::LexisErr,
    };
    use suitest::{after_all, before_all, cleanup};

    const TEST_LIBRARY_PATH: &str = "__document_service_test_library__";

    const LEI_TESTE: &str = "Nos termos da alínea c) do artigo 161.º da Constituição, \
a Assembleia da República decreta o seguinte, para valer como lei geral da República.

Artigo 1º Objeto
A presente lei estabelece o regime aplicável aos contratos.

Artigo 2º Âmbito
A presente lei aplica-se em todo o território nacional.";

    #[before_all]
    async fn setup() -> TestState {
        let _ = tokio::fs::remove_dir_all(TEST_LIBRARY_PATH).await;
        tokio::fs::create_dir(TEST_LIBRARY_PATH).await.unwrap();

        let test_state = TestState::init(TestStateConfig {
            fs_store_path: TEST_LIBRARY_PATH.to_string(),
        })
        .await;

        test_state
    }

    #[cleanup]
    async fn cleanup() {
        let _ = tokio::fs::remove_dir_all(TEST_LIBRARY_PATH).await;
    }

    #[after_all]
    async fn teardown() {
        let _ = tokio::fs::remove_dir_all(TEST_LIBRARY_PATH).await;
    }

    #[test]
    async fn process_and_get_roundtrip(state: TestState) {
        let service = state.document.clone();

        let document = service
            .process(DocumentProcess::new("lei-teste.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        assert_eq!("lei-teste.txt", document.name);
        assert_eq!(3, document.chunks.len());
        assert_eq!("chunk-preamble", document.chunks[0].id);
        assert_eq!("chunk-artigo-0", document.chunks[1].id);
        assert_eq!("Artigo 1º Objeto", document.chunks[1].title);
        assert_eq!("chunk-artigo-1", document.chunks[2].id);

        let stored = service.get_document("lei-teste.txt").await.unwrap();

        assert_eq!(document, stored);

        service.delete("lei-teste.txt").await.unwrap();
    }

    #[test]
    async fn processing_is_deterministic(state: TestState) {
        let service = state.document.clone();

        let first = service
            .process(DocumentProcess::new("lei-det.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        let second = service
            .process(DocumentProcess::new("lei-det.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        assert_eq!(first.chunks, second.chunks);

        service.delete("lei-det.txt").await.unwrap();
    }

    #[test]
    async fn reprocessing_replaces_document(state: TestState) {
        let service = state.document.clone();

        service
            .process(DocumentProcess::new("lei-v.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        let unstructured = "Este documento não tem qualquer estrutura de artigos.";

        let replaced = service
            .process(DocumentProcess::new("lei-v.txt".to_string(), unstructured))
            .await
            .unwrap();

        assert_eq!(1, replaced.chunks.len());
        assert_eq!("chunk-0", replaced.chunks[0].id);

        let documents = service.list_documents().await.unwrap();
        let entries = documents
            .iter()
            .filter(|document| document.name == "lei-v.txt")
            .count();

        assert_eq!(1, entries);

        let stored = service.get_document("lei-v.txt").await.unwrap();

        assert_eq!(replaced.chunks, stored.chunks);

        service.delete("lei-v.txt").await.unwrap();
    }

    #[test]
    async fn listing_is_most_recent_first(state: TestState) {
        let service = state.document.clone();

        service
            .process(DocumentProcess::new("lei-a.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        service
            .process(DocumentProcess::new("lei-b.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        let documents = service.list_documents().await.unwrap();

        assert_eq!(2, documents.len());
        assert_eq!("lei-b.txt", documents[0].name);
        assert_eq!("lei-a.txt", documents[1].name);

        service.delete("lei-a.txt").await.unwrap();
        service.delete("lei-b.txt").await.unwrap();
    }

    #[test]
    async fn document_name_is_trimmed(state: TestState) {
        let service = state.document.clone();

        let document = service
            .process(DocumentProcess::new("  lei-trim.txt  ".to_string(), LEI_TESTE))
            .await
            .unwrap();

        assert_eq!("lei-trim.txt", document.name);

        service.delete("lei-trim.txt").await.unwrap();
    }

    #[test]
    async fn deleted_documents_are_gone(state: TestState) {
        let service = state.document.clone();

        service
            .process(DocumentProcess::new("lei-del.txt".to_string(), LEI_TESTE))
            .await
            .unwrap();

        service.delete("lei-del.txt").await.unwrap();

        let error = service.get_document("lei-del.txt").await.unwrap_err();

        assert!(matches!(error.error, LexisErr::DoesNotExist(_)));

        let error = service.delete("lei-del.txt").await.unwrap_err();

        assert!(matches!(error.error, LexisErr::DoesNotExist(_)));
    }

    #[test]
    async fn degenerate_text_stores_empty_document(state: TestState) {
        let service = state.document.clone();

        let document = service
            .process(DocumentProcess::new("vazio.txt".to_string(), "   \n\t  "))
            .await
            .unwrap();

        assert!(document.chunks.is_empty());

        let stored = service.get_document("vazio.txt").await.unwrap();

        assert!(stored.chunks.is_empty());

        service.delete("vazio.txt").await.unwrap();
    }
}
