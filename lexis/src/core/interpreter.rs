use crate::{core::model::ChatMessage, error::LexisError};

/// The single capability every LLM backend implements. Everything upstream
/// of this trait is provider agnostic.
#[async_trait::async_trait]
pub trait Interpreter {
    fn id(&self) -> &'static str;

    /// Answer `question` using only `context`, continuing `history`.
    async fn interpret(
        &self,
        context: &str,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String, LexisError>;
}
