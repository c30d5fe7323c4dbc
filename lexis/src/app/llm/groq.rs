use crate::{
    app::llm::map_history,
    core::{interpreter::Interpreter, model::ChatMessage},
    error::LexisError,
    map_err,
};

pub use lexis_interpreters::groq::GroqInterpreter;

#[async_trait::async_trait]
impl Interpreter for GroqInterpreter {
    fn id(&self) -> &'static str {
        "groq"
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
