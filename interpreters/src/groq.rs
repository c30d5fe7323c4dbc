use crate::{
    error::InterpreterError, HistoryMessage, HistoryRole, EMPTY_COMPLETION_REPLY, SYSTEM_PROMPT,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;
use tracing::debug;

const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai";
const LLAMA3_70B: &str = "llama3-70b-8192";

/// Client for the Groq chat completions API (OpenAI compatible).
pub struct GroqInterpreter {
    endpoint: String,
    key: String,
    model: String,
    client: reqwest::Client,
}

impl GroqInterpreter {
    pub fn new(api_key: &str) -> Self {
        Self {
            endpoint: DEFAULT_GROQ_ENDPOINT.to_string(),
            key: api_key.to_string(),
            model: LLAMA3_70B.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn interpret(
        &self,
        context: &str,
        question: &str,
        history: &[HistoryMessage],
    ) -> Result<String, InterpreterError> {
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];

        for msg in history {
            messages.push(match msg.role {
                HistoryRole::User => ChatMessage::user(&msg.content),
                HistoryRole::Assistant => ChatMessage::assistant(&msg.content),
            });
        }

        messages.push(ChatMessage::user(&crate::user_prompt(context, question)));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.7),
            max_tokens: None,
        };

        let response = self.complete(&request).await?;

        debug!(
            "Interpreted question with '{}', used tokens {}-{} (prompt-total)",
            response.model,
            response.usage.prompt_tokens,
            response.usage.total_tokens
        );

        let answer = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION_REPLY.to_string());

        Ok(answer)
    }

    /// Issue a minimal completion request to validate the configured key.
    pub async fn test_connection(&self) -> Result<(), InterpreterError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user("test")],
            temperature: None,
            max_tokens: Some(1),
        };

        self.complete(&request).await.map(|_| ())
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, InterpreterError> {
        let response = match self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .bearer_auth(&self.key)
            .json(request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in Groq request: {e}");
                return Err(InterpreterError::Reqwest(e));
            }
        };

        if response.status() != 200 {
            tracing::error!(
                "Request to {} failed with status {}",
                response.url(),
                response.status()
            );
            let response = match response.json::<GroqError>().await {
                Ok(res) => res,
                Err(e) => {
                    tracing::error!("Error reading Groq response: {}", e);
                    tracing::error!("Source: {:?}", e.source());
                    return Err(InterpreterError::Reqwest(e));
                }
            };
            tracing::error!("Response: {response:?}");
            return Err(InterpreterError::Groq(response));
        }

        match response.json::<CompletionResponse>().await {
            Ok(res) => Ok(res),
            Err(e) => {
                tracing::error!("Error decoding Groq response: {}", e);
                tracing::error!("Source: {:?}", e.source());
                Err(InterpreterError::Reqwest(e))
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    fn assistant(content: &str) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    total_tokens: usize,
}

#[derive(Debug, Deserialize, Error)]
#[error("{message}, type: {r#type:?}, code: {code:?}")]
pub struct GroqErrorParams {
    pub message: String,
    pub r#type: Option<String>,
    pub code: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Error)]
#[error("Groq error response {{ {error} }}")]
pub struct GroqError {
    pub error: GroqErrorParams,
}
