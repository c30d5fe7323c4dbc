use crate::{
    app::llm::map_history,
    core::{interpreter::Interpreter, model::ChatMessage},
    error::LexisError,
    map_err,
};

pub use lexis_interpreters::gemini::GeminiInterpreter;

#[async_trait::async_trait]
impl Interpreter for GeminiInterpreter {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn interpret(
        &self,
        context: &str,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String, LexisError> {
        let history = map_history(history);
        Ok(map_err!(self.interpret(context, question, &history).await))
    }
}
