use super::SegmenterError;
use regex::Regex;

/// Matches "Artigo 1.º", "Art. 2.º", "Artigo 3-A." etc. at the start of a line.
const ARTICLE_PATTERN: &str = r"(?m)^(Art(?:igo)?\.?[ \t]+\d+º?(?:-?[A-Z\d]+)?\.?.*)";

/// A structural heading found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Byte offset of the heading's first character in the input.
    pub offset: usize,

    /// The full heading line as matched, untrimmed.
    pub line: &'a str,
}

/// Locates structural section headings in a document.
///
/// Heading conventions are jurisdiction specific, so implementations are
/// swappable without touching anything downstream of segmentation.
pub trait HeadingMatcher {
    fn headings<'a>(&self, text: &'a str) -> Vec<Heading<'a>>;
}

/// Matches Portuguese legal-drafting article markers: an article keyword
/// (full or abbreviated), a numeral with an optional ordinal mark and an
/// optional suffix for inserted articles, plus the rest of the heading line.
#[derive(Debug, Clone)]
pub struct ArticleMatcher {
    re: Regex,
}

impl ArticleMatcher {
    pub fn new() -> Result<Self, SegmenterError> {
        Ok(Self {
            re: Regex::new(ARTICLE_PATTERN)?,
        })
    }
}

impl Default for ArticleMatcher {
    fn default() -> Self {
        Self::new().expect("invalid article pattern")
    }
}

impl HeadingMatcher for ArticleMatcher {
    fn headings<'a>(&self, text: &'a str) -> Vec<Heading<'a>> {
        self.re
            .find_iter(text)
            .map(|m| Heading {
                offset: m.start(),
                line: m.as_str(),
            })
            .collect()
    }
}
