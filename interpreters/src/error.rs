use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("http client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("gemini error: {0}")]
    Gemini(crate::gemini::GeminiError),

    #[error("groq error: {0}")]
    Groq(crate::groq::GroqError),

    #[error("ollama error: {0}")]
    Ollama(String),
}
