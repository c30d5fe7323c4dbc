use crate::{
    error::InterpreterError, HistoryMessage, HistoryRole, EMPTY_COMPLETION_REPLY, SYSTEM_PROMPT,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::debug;

const OLLAMA_DEFAULT_MODEL: &str = "llama3";

/// Client for a self-hosted Ollama server's `/api/chat` endpoint.
pub struct OllamaInterpreter {
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaInterpreter {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            model: OLLAMA_DEFAULT_MODEL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn interpret(
        &self,
        context: &str,
        question: &str,
        history: &[HistoryMessage],
    ) -> Result<String, InterpreterError> {
        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        }];

        for msg in history {
            messages.push(ChatMessage {
                role: match msg.role {
                    HistoryRole::User => "user".to_string(),
                    HistoryRole::Assistant => "assistant".to_string(),
                },
                content: msg.content.clone(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: crate::user_prompt(context, question),
        });

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            // The full response at once
            stream: false,
        };

        let response = match self
            .client
            .post(format!("{}/api/chat", self.url))
            .json(&request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in Ollama request: {e}");
                return Err(InterpreterError::Reqwest(e));
            }
        };

        if response.status() != 200 {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Ollama server responded with status {status}: {body}");
            return Err(InterpreterError::Ollama(format!(
                "server responded with status {status}: {body}"
            )));
        }

        let response = match response.json::<ChatResponse>().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error decoding Ollama response: {}", e);
                tracing::error!("Source: {:?}", e.source());
                return Err(InterpreterError::Reqwest(e));
            }
        };

        debug!("Interpreted question with '{}'", self.model);

        let answer = response
            .message
            .map(|msg| msg.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION_REPLY.to_string());

        Ok(answer)
    }

    /// Probe the server root, which responds with a fixed banner when up.
    pub async fn test_connection(&self) -> Result<(), InterpreterError> {
        let response = match self.client.get(&self.url).send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error probing Ollama server: {e}");
                return Err(InterpreterError::Reqwest(e));
            }
        };

        if response.status() != 200 {
            return Err(InterpreterError::Ollama(format!(
                "server responded with status {}",
                response.status()
            )));
        }

        let body = response.text().await.unwrap_or_default();
        if !body.contains("Ollama is running") {
            return Err(InterpreterError::Ollama(
                "server does not appear to be an Ollama server".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
}
