use std::error::Error as _;
use thiserror::Error;
use tracing::error;
use validify::ValidationErrors;

pub mod http;

#[derive(Debug, Error)]
pub enum LexisErr {
    #[error("A previous question is still being answered")]
    Busy,

    #[error("Does not exist; {0}")]
    DoesNotExist(String),

    #[error("Invalid file name; {0}")]
    InvalidFileName(String),

    #[error("Invalid provider; {0}")]
    InvalidProvider(String),

    #[error("segmenter: {0}")]
    Segmenter(#[from] segx::SegmenterError),

    #[error("regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("interpreter: {0}")]
    Interpreter(#[from] lexis_interpreters::error::InterpreterError),

    #[error("IO; {0}")]
    IO(#[from] std::io::Error),

    #[error("JSON error; {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Validation; {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Http; {0}")]
    Http(#[from] axum::http::Error),

    #[error("Axum; {0}")]
    Axum(#[from] axum::Error),
}

#[derive(Debug, Error)]
#[error("{error}")]
pub struct LexisError {
    file: &'static str,
    line: u32,
    column: u32,
    pub error: LexisErr,
}

impl LexisError {
    pub fn new(file: &'static str, line: u32, column: u32, error: LexisErr) -> LexisError {
        LexisError {
            file,
            line,
            column,
            error,
        }
    }

    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }

    pub fn print(&self) {
        let location = self.location();

        error!("{location} | {self}");

        if self.error.source().is_some() {
            error!("Causes:");
        }

        let mut src = self.error.source();
        while let Some(source) = src {
            error!(" - {source}");
            src = source.source();
        }
    }
}

#[macro_export]
macro_rules! err {
    ($ty:ident $(, $l:literal $(,)? $($args:expr),* )?) => {
        Err($crate::error::LexisError::new(
            file!(),
            line!(),
            column!(),
            $crate::error::LexisErr::$ty $( (format!($l, $( $args, )*)) )?,
        ))
    };
}

#[macro_export]
macro_rules! map_err {
    ($ex:expr) => {
        $ex.map_err(|e| $crate::error::LexisError::new(file!(), line!(), column!(), e.into()))?
    };
}
