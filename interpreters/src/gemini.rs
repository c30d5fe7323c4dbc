use crate::{
    error::InterpreterError, HistoryMessage, HistoryRole, EMPTY_COMPLETION_REPLY, SYSTEM_PROMPT,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;
use tracing::debug;

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const GEMINI_FLASH: &str = "gemini-2.5-flash";

/// Client for the Google Gemini `generateContent` API.
///
/// `generateContent` takes a single prompt, so the conversation history is
/// folded into the prompt text.
pub struct GeminiInterpreter {
    endpoint: String,
    key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiInterpreter {
    pub fn new(api_key: &str) -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            key: api_key.to_string(),
            model: GEMINI_FLASH.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn interpret(
        &self,
        context: &str,
        question: &str,
        history: &[HistoryMessage],
    ) -> Result<String, InterpreterError> {
        let history_text = if history.is_empty() {
            String::new()
        } else {
            let turns = history
                .iter()
                .map(|msg| {
                    let speaker = match msg.role {
                        HistoryRole::User => "Utilizador",
                        HistoryRole::Assistant => "Assistente",
                    };
                    format!("{speaker}: {}", msg.content)
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("HISTÓRICO DA CONVERSA RECENTE:\n---\n{turns}\n---\n\n")
        };

        let prompt = format!("{history_text}{}", crate::user_prompt(context, question));

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            },
        };

        let response = match self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.endpoint, self.model
            ))
            .header("x-goog-api-key", &self.key)
            .json(&request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in Gemini request: {e}");
                return Err(InterpreterError::Reqwest(e));
            }
        };

        if response.status() != 200 {
            tracing::error!(
                "Request to {} failed with status {}",
                response.url(),
                response.status()
            );
            let response = match response.json::<GeminiError>().await {
                Ok(res) => res,
                Err(e) => {
                    tracing::error!("Error reading Gemini response: {}", e);
                    tracing::error!("Source: {:?}", e.source());
                    return Err(InterpreterError::Reqwest(e));
                }
            };
            tracing::error!("Response: {response:?}");
            return Err(InterpreterError::Gemini(response));
        }

        let response = match response.json::<GenerateContentResponse>().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error decoding Gemini response: {}", e);
                tracing::error!("Source: {:?}", e.source());
                return Err(InterpreterError::Reqwest(e));
            }
        };

        debug!(
            "Interpreted question with '{}', {} candidate(s)",
            self.model,
            response.candidates.len()
        );

        let answer = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION_REPLY.to_string());

        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize, Error)]
#[error("{message}, status: {status:?}, code: {code:?}")]
pub struct GeminiErrorParams {
    pub message: String,
    pub status: Option<String>,
    pub code: Option<usize>,
}

#[derive(Debug, Deserialize, Error)]
#[error("Gemini error response {{ {error} }}")]
pub struct GeminiError {
    pub error: GeminiErrorParams,
}
