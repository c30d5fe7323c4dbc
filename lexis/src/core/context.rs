use crate::core::model::{ChatMessage, Chunk};

/// Number of most recent turns kept when building the interpreter payload,
/// bounding prompt size.
pub const HISTORY_WINDOW: usize = 6;

const CONTEXT_HEADER: &str = "CONTEXTO: As seguintes secções foram extraídas do documento por serem relevantes para a pergunta do utilizador:";

/// The full payload handed to the interpreter collaborator. The assembler
/// itself never talks to the network.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub context_block: String,
    pub history: Vec<ChatMessage>,
}

/// Build the interpreter payload from ranked chunks and the conversation so
/// far.
///
/// Chunks appear in ranked order, most relevant first. `history` must
/// already contain the question as its final turn; that turn is excluded
/// and only the most recent [HISTORY_WINDOW] of the remainder are kept.
///
/// Returns `None` when `ranked` is empty; callers must short-circuit and
/// not invoke the interpreter at all.
pub fn assemble(ranked: &[&Chunk], history: &[ChatMessage]) -> Option<AssembledContext> {
    if ranked.is_empty() {
        return None;
    }

    let sections = ranked
        .iter()
        .map(|chunk| format!("Secção \"{}\":\n{}", chunk.title, chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n");

    let context_block = format!("{CONTEXT_HEADER}\n\n---\n{sections}\n---");

    let considered = &history[..history.len().saturating_sub(1)];
    let start = considered.len().saturating_sub(HISTORY_WINDOW);

    Some(AssembledContext {
        context_block,
        history: considered[start..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(title: &str, content: &str) -> Chunk {
        Chunk::new(format!("chunk-{title}"), title.to_string(), content.to_string())
    }

    #[tokio::test]
    async fn empty_ranked_set_yields_nothing() {
        let history = vec![ChatMessage::user("pergunta")];

        assert!(assemble(&[], &history).is_none());
    }

    #[tokio::test]
    async fn context_block_format() {
        let a = chunk("Artigo 1.º", "Artigo 1.º\ncorpo um");
        let b = chunk("Artigo 2.º", "Artigo 2.º\ncorpo dois");
        let history = vec![ChatMessage::user("pergunta")];

        let assembled = assemble(&[&a, &b], &history).unwrap();

        let expected = "CONTEXTO: As seguintes secções foram extraídas do documento por serem relevantes para a pergunta do utilizador:\n\n---\nSecção \"Artigo 1.º\":\nArtigo 1.º\ncorpo um\n\n---\nSecção \"Artigo 2.º\":\nArtigo 2.º\ncorpo dois\n---";

        assert_eq!(expected, assembled.context_block);
    }

    #[tokio::test]
    async fn ranked_order_is_preserved() {
        // Most relevant chunk comes later in the document.
        let a = chunk("Artigo 7.º", "corpo");
        let b = chunk("Artigo 2.º", "corpo");
        let history = vec![ChatMessage::user("pergunta")];

        let assembled = assemble(&[&a, &b], &history).unwrap();

        let first = assembled.context_block.find("Artigo 7.º").unwrap();
        let second = assembled.context_block.find("Artigo 2.º").unwrap();

        assert!(first < second);
    }

    #[tokio::test]
    async fn history_excludes_question_and_is_bounded() {
        let a = chunk("Artigo 1.º", "corpo");

        let mut history = vec![];
        for i in 0..9 {
            history.push(ChatMessage::user(format!("pergunta {i}")));
            history.push(ChatMessage::model(format!("resposta {i}")));
        }
        history.push(ChatMessage::user("pergunta atual"));

        let assembled = assemble(&[&a], &history).unwrap();

        assert_eq!(HISTORY_WINDOW, assembled.history.len());
        assert_eq!("pergunta 6", assembled.history[0].content);
        assert_eq!("resposta 8", assembled.history[5].content);
        assert!(assembled
            .history
            .iter()
            .all(|turn| turn.content != "pergunta atual"));
    }

    #[tokio::test]
    async fn short_history_is_kept_whole() {
        let a = chunk("Artigo 1.º", "corpo");
        let history = vec![
            ChatMessage::model("saudação"),
            ChatMessage::user("pergunta atual"),
        ];

        let assembled = assemble(&[&a], &history).unwrap();

        assert_eq!(1, assembled.history.len());
        assert_eq!("saudação", assembled.history[0].content);
    }
}
