pub mod error;
pub mod gemini;
pub mod groq;
pub mod ollama;

/// Conversation roles as the chat backends see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRole {
    User,
    Assistant,
}

/// A prior conversation turn handed to a backend alongside the question.
#[derive(Debug, Clone)]
pub struct HistoryMessage {
    pub role: HistoryRole,
    pub content: String,
}

/// Instructions shared by all backends. Answers must stay within the
/// provided context and be written in European Portuguese.
pub(crate) const SYSTEM_PROMPT: &str = r#"You are an AI assistant named Legal Eagle, specializing in simplifying complex legal text.
Your task is to provide a simplified explanation for the user's question based *only* on the provided context from a legal document.
Your response should be *only* the simplified explanation. Do not repeat the original text from the context. Do not add introductory phrases like "Here is the explanation".
You will be given the recent conversation history for context. Use it to continue the conversation naturally.

Your entire response MUST be in European Portuguese.
Explain the concepts in plain, easy-to-understand language, as if you were explaining it to a high school student.
Do not invent information or use knowledge outside of the provided context.
If the context does not contain the answer, state that clearly in Portuguese (e.g., "A informação não se encontra no contexto fornecido.")."#;

/// Fallback reply when a backend responds successfully but with no content.
pub(crate) const EMPTY_COMPLETION_REPLY: &str = "Desculpe, não consegui gerar uma resposta.";

pub(crate) fn user_prompt(context: &str, question: &str) -> String {
    format!(
        r#"{context}

---
Pergunta do Utilizador: "{question}"
---

A sua explicação simplificada (em Português Europeu), continuando a conversa com base no histórico fornecido:"#
    )
}
