use crate::{core::model::Chunk, error::LexisError, map_err};
use segx::{ArticleMatcher, HeadingMatcher, SlidingWindow};
use tracing::warn;

/// Preambles at most this long (trimmed) are treated as noise, e.g. running
/// headers or a table of contents, and discarded.
const PREAMBLE_MIN_LEN: usize = 100;
const PREAMBLE_TITLE: &str = "Preâmbulo / Introdução";
const PREAMBLE_ID: &str = "chunk-preamble";

/// A fallback window's first line is usable as a title when its trimmed
/// length falls in this range.
const FALLBACK_TITLE_MIN: usize = 11;
const FALLBACK_TITLE_MAX: usize = 99;

/// Converts extracted document text into an ordered sequence of named,
/// addressable chunks.
///
/// Structural detection takes priority; when the matcher finds no headings
/// the whole text is segmented with fixed-size windows instead. Absence of
/// structure is never an error and neither is empty input, which yields an
/// empty sequence.
pub struct Segmenter {
    matcher: Box<dyn HeadingMatcher + Send + Sync>,
    fallback: SlidingWindow,
}

impl Segmenter {
    pub fn new() -> Result<Self, LexisError> {
        let matcher = map_err!(ArticleMatcher::new());
        Ok(Self {
            matcher: Box::new(matcher),
            fallback: SlidingWindow::default(),
        })
    }

    /// Use a different heading convention without touching anything
    /// downstream of segmentation.
    pub fn with_matcher(
        matcher: Box<dyn HeadingMatcher + Send + Sync>,
        fallback: SlidingWindow,
    ) -> Self {
        Self { matcher, fallback }
    }

    pub fn segment(&self, text: &str) -> Result<Vec<Chunk>, LexisError> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        let headings = self.matcher.headings(text);

        if headings.is_empty() {
            warn!("No article structure found, falling back to fixed-size segmentation");
            return self.fallback_chunks(text);
        }

        let mut chunks = Vec::with_capacity(headings.len() + 1);

        // Text before the first heading is a candidate preamble.
        let first = headings[0].offset;
        if first > 0 {
            let preamble = text[..first].trim();
            if preamble.chars().count() > PREAMBLE_MIN_LEN {
                chunks.push(Chunk::new(
                    PREAMBLE_ID.to_string(),
                    PREAMBLE_TITLE.to_string(),
                    preamble.to_string(),
                ));
            }
        }

        for (i, heading) in headings.iter().enumerate() {
            let end = headings
                .get(i + 1)
                .map(|next| next.offset)
                .unwrap_or(text.len());

            chunks.push(Chunk::new(
                format!("chunk-artigo-{i}"),
                heading.line.trim().to_string(),
                text[heading.offset..end].trim().to_string(),
            ));
        }

        Ok(chunks)
    }

    fn fallback_chunks(&self, text: &str) -> Result<Vec<Chunk>, LexisError> {
        let windows = map_err!(self.fallback.windows(text));

        let mut chunks = Vec::with_capacity(windows.len());

        for (i, window) in windows.into_iter().enumerate() {
            if window.text.trim().is_empty() {
                continue;
            }

            let first_line = window.text.split('\n').next().unwrap_or("").trim();
            let line_len = first_line.chars().count();

            // Numbered by window position, so a dropped whitespace window
            // leaves a gap rather than shifting later titles.
            let title = if (FALLBACK_TITLE_MIN..=FALLBACK_TITLE_MAX).contains(&line_len) {
                first_line.to_string()
            } else {
                format!("Parte {}", i + 1)
            };

            chunks.push(Chunk::new(
                format!("chunk-{}", window.start),
                title,
                window.text.to_string(),
            ));
        }

        Ok(chunks)
    }
}
