/// Chat orchestration.
pub mod chat;

/// Document library management.
pub mod document;
