use crate::core::model::{ChatMessage, Chunk};

/// Reply when the question yields no usable tokens.
pub const EMPTY_QUERY_REPLY: &str = "Por favor, faça uma pergunta mais específica para que eu possa encontrar a informação no documento.";

/// Reply when no chunk scored above zero for the question.
pub const NO_RELEVANT_SECTION_REPLY: &str = "Não consegui encontrar nenhuma secção relevante no documento para responder à sua pergunta. Tente reformular a sua questão.";

/// Reply when the interpreter collaborator fails, for any reason.
pub const INTERPRETER_FAILURE_REPLY: &str =
    "Desculpe, encontrei um erro ao gerar a resposta. Por favor, tente novamente.";

pub fn processed_greeting(name: &str, chunks: usize) -> String {
    format!("O seu documento \"{name}\" foi processado e estruturado. Encontrámos {chunks} artigos/secções. Agora pode \"conversar\" com ele. Faça uma pergunta para começar.")
}

pub fn library_greeting(name: &str) -> String {
    format!("Documento \"{name}\" carregado da sua biblioteca. Pode começar a fazer perguntas.")
}

/// The active document conversation.
///
/// Chunks are immutable once set and replaced wholesale when another
/// document is opened. History is append-only and cleared on switch. At
/// most one question may be in flight at a time.
#[derive(Debug, Default)]
pub struct Session {
    pub document: Option<String>,
    pub chunks: Vec<Chunk>,
    pub history: Vec<ChatMessage>,
    pub references: Vec<Chunk>,
    pub answering: bool,
}

impl Session {
    /// Replace the active document, clearing all conversation state.
    pub fn open(&mut self, name: &str, chunks: Vec<Chunk>, greeting: String) {
        self.document = Some(name.to_string());
        self.chunks = chunks;
        self.history = vec![ChatMessage::model(greeting)];
        self.references.clear();
        self.answering = false;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}
