//! Module containing concrete implementations from the [core](crate::core) module.

/// Document library implementations.
pub mod document;

/// Interpreter backend implementations.
pub mod llm;

/// HTTP server implementation.
pub mod server;

/// Application state configuration.
pub mod state;

#[cfg(test)]
pub mod test;
