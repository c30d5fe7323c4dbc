use super::document::store::FsDocumentStore;
use crate::{
    core::{
        provider::InterpreterProvider,
        rank::Ranker,
        segment::Segmenter,
        service::{chat::ChatService, document::DocumentService},
        session::Session,
    },
    error::LexisError,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    /// Lexis services.
    pub services: ServiceState,

    /// Downstream interpreter providers.
    /// Used for displaying some metadata and in tests.
    pub providers: AppProviderState,

    /// The active document conversation. Locked for the whole of an answer
    /// turn, which serializes question submission.
    pub session: Arc<Mutex<Session>>,

    /// Interpreter used when a question does not name one.
    pub default_provider: String,
}

impl AppState {
    /// Load the application state using the provided configuration.
    pub async fn new(args: &crate::config::StartArgs) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from(args.log()))
            .init();

        let store = FsDocumentStore::new(&args.data_path());

        let interpreter = Self::init_interpreter_providers(args);

        let providers = AppProviderState {
            interpreter: interpreter.clone(),
        };

        let segmenter = Arc::new(Segmenter::new().expect("invalid article pattern"));

        let document = DocumentService::new(store, segmenter);
        let chat = Arc::new(ChatService::new(interpreter, Ranker::default()));

        let default_provider = args.default_provider();

        if providers
            .interpreter
            .get_provider(&default_provider)
            .is_err()
        {
            panic!("default provider '{default_provider}' is not configured");
        }

        Self {
            services: ServiceState { document, chat },
            providers,
            session: Arc::new(Mutex::new(Session::default())),
            default_provider,
        }
    }

    fn init_interpreter_providers(args: &crate::config::StartArgs) -> Arc<InterpreterProvider> {
        let mut provider = InterpreterProvider::default();

        if let Some(key) = args.gemini_api_key() {
            let gemini = Arc::new(crate::app::llm::gemini::GeminiInterpreter::new(&key));
            provider.register("gemini", gemini);
        }

        if let Some(key) = args.groq_api_key() {
            let groq = Arc::new(crate::app::llm::groq::GroqInterpreter::new(&key));
            provider.register("groq", groq);
        }

        if let Some(url) = args.ollama_url() {
            let ollama = Arc::new(crate::app::llm::ollama::OllamaInterpreter::new(&url));
            provider.register("ollama", ollama);
        }

        if provider.list_provider_ids().is_empty() {
            panic!("at least one interpreter backend must be configured");
        }

        Arc::new(provider)
    }

    /// Used for metadata display.
    pub fn get_configuration(&self) -> Result<AppConfig, LexisError> {
        let mut interpreter_providers = self
            .providers
            .interpreter
            .list_provider_ids()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>();

        interpreter_providers.sort();

        Ok(AppConfig {
            interpreter_providers,
            default_provider: self.default_provider.clone(),
        })
    }
}

/// Concrete service implementations.
#[derive(Clone)]
pub struct ServiceState {
    pub document: DocumentService<FsDocumentStore>,
    pub chat: Arc<ChatService>,
}

/// Concrete downstream providers.
#[derive(Clone)]
pub struct AppProviderState {
    pub interpreter: Arc<InterpreterProvider>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AppConfig {
    /// Configured interpreter backends.
    pub interpreter_providers: Vec<String>,

    /// Backend used when a question does not name one.
    pub default_provider: String,
}
