pub mod article;
pub mod sliding;

pub use article::{ArticleMatcher, Heading, HeadingMatcher};
pub use sliding::SlidingWindow;

#[derive(Debug, thiserror::Error)]
pub enum SegmenterError {
    #[error("{0}")]
    Config(String),

    #[error("regex: {0}")]
    Regex(#[from] regex::Error),
}
