use crate::{core::model::Chunk, error::LexisError, map_err};
use regex::Regex;

/// How many chunks a question is answered from.
pub const DEFAULT_TOP_K: usize = 3;

/// Query tokens are word runs at least this long; anything shorter is noise.
const TOKEN_PATTERN: &str = r"\b\w{3,}\b";

/// A token present in a title is worth this much more than one present in
/// content, so e.g. an article number mentioned in the question dominates.
const TITLE_WEIGHT: usize = 5;
const CONTENT_WEIGHT: usize = 1;

/// Scores chunks against a question by lexical term presence.
///
/// Deliberately substring based, no stemming and no embeddings: cheap,
/// deterministic and explainable, at the cost of missing paraphrased
/// questions.
#[derive(Debug, Clone)]
pub struct Ranker {
    pattern: Regex,
    pub k: usize,
}

impl Ranker {
    pub fn new(k: usize) -> Result<Self, LexisError> {
        let pattern = map_err!(Regex::new(TOKEN_PATTERN));
        Ok(Self { pattern, k })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K).expect("invalid token pattern")
    }
}

struct ScoredChunk<'a> {
    chunk: &'a Chunk,
    score: usize,
}

impl Ranker {
    /// Unique lowercased question tokens, in first-seen order.
    ///
    /// An empty result means the question is not actionable and ranking
    /// must not be attempted.
    pub fn tokens(&self, question: &str) -> Vec<String> {
        let question = question.to_lowercase();

        let mut tokens: Vec<String> = vec![];
        for m in self.pattern.find_iter(&question) {
            if !tokens.iter().any(|t| t == m.as_str()) {
                tokens.push(m.as_str().to_string());
            }
        }

        tokens
    }

    /// Rank `chunks` against `question`, most relevant first.
    ///
    /// Returns at most `k` chunks, fewer only when fewer scored above zero.
    /// Chunks with equal scores keep their document order.
    pub fn rank<'a>(&self, chunks: &'a [Chunk], question: &str) -> Vec<&'a Chunk> {
        let tokens = self.tokens(question);

        if tokens.is_empty() {
            return vec![];
        }

        let mut scored = chunks
            .iter()
            .filter_map(|chunk| {
                let score = self.score(chunk, &tokens);
                (score > 0).then_some(ScoredChunk { chunk, score })
            })
            .collect::<Vec<_>>();

        // Ties retain document order, the sort must stay stable.
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        scored
            .into_iter()
            .take(self.k)
            .map(|scored| scored.chunk)
            .collect()
    }

    /// Presence is binary per token per field; this is not a frequency
    /// scorer.
    fn score(&self, chunk: &Chunk, tokens: &[String]) -> usize {
        let title = chunk.title.to_lowercase();
        let content = chunk.content.to_lowercase();

        let mut score = 0;

        for token in tokens {
            if title.contains(token.as_str()) {
                score += TITLE_WEIGHT;
            }
            if content.contains(token.as_str()) {
                score += CONTENT_WEIGHT;
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, title: &str, content: &str) -> Chunk {
        Chunk::new(id.to_string(), title.to_string(), content.to_string())
    }

    #[tokio::test]
    async fn tokens_are_deduplicated_and_lowercased() {
        let ranker = Ranker::default();
        let tokens = ranker.tokens("Qual o PRAZO do prazo previsto?");

        assert_eq!(vec!["qual", "prazo", "previsto"], tokens);
    }

    #[tokio::test]
    async fn short_tokens_are_ignored() {
        let ranker = Ranker::default();

        assert!(ranker.tokens("e a o um").is_empty());
    }

    #[tokio::test]
    async fn empty_query_yields_no_chunks() {
        let ranker = Ranker::default();
        let chunks = vec![chunk("chunk-artigo-0", "Artigo 1.º", "texto")];

        assert!(ranker.rank(&chunks, "e a").is_empty());
    }

    #[tokio::test]
    async fn title_match_outranks_content_match() {
        let ranker = Ranker::default();
        let chunks = vec![
            chunk("chunk-artigo-0", "Disposições gerais", "fala de prazo aqui"),
            chunk("chunk-artigo-1", "Prazo de entrega", "outro assunto"),
        ];

        let ranked = ranker.rank(&chunks, "qual o prazo?");

        assert_eq!(2, ranked.len());
        assert_eq!("chunk-artigo-1", ranked[0].id);
        assert_eq!("chunk-artigo-0", ranked[1].id);
    }

    #[tokio::test]
    async fn repeated_occurrences_do_not_raise_the_score() {
        let ranker = Ranker::default();
        let chunks = vec![
            chunk("chunk-artigo-0", "Artigo 5", "fala do prazo uma vez"),
            chunk("chunk-artigo-1", "Artigo 9", "prazo prazo prazo prazo"),
        ];

        let ranked = ranker.rank(&chunks, "Qual o prazo no artigo 5?");

        // Both score title "artigo" + content "prazo"; the tie keeps
        // document order.
        assert_eq!("chunk-artigo-0", ranked[0].id);
        assert_eq!("chunk-artigo-1", ranked[1].id);
    }

    #[tokio::test]
    async fn equal_scores_retain_document_order() {
        let ranker = Ranker::default();
        let chunks = vec![
            chunk("a", "Artigo 1.º", "sem correspondência"),
            chunk("b", "Outra coisa", "contém prazo"),
            chunk("c", "Mais uma", "contém prazo"),
            chunk("d", "E outra", "contém prazo"),
        ];

        let ranked = ranker.rank(&chunks, "prazo");

        assert_eq!(vec!["b", "c", "d"], ranked.iter().map(|c| c.id.as_str()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn returns_at_most_k() {
        let ranker = Ranker::default();
        let chunks = (0..10)
            .map(|i| chunk(&format!("c{i}"), "Artigo", "prazo"))
            .collect::<Vec<_>>();

        assert_eq!(DEFAULT_TOP_K, ranker.rank(&chunks, "prazo").len());
    }

    #[tokio::test]
    async fn zero_scores_are_dropped() {
        let ranker = Ranker::default();
        let chunks = vec![
            chunk("a", "Artigo 1.º", "sobre rendas"),
            chunk("b", "Artigo 2.º", "sobre prazos"),
        ];

        let ranked = ranker.rank(&chunks, "rendas");

        assert_eq!(1, ranked.len());
        assert_eq!("a", ranked[0].id);
    }

    #[tokio::test]
    async fn constructs_with_custom_k() {
        let ranker = Ranker::new(5).unwrap();

        assert_eq!(5, ranker.k);
    }
}
