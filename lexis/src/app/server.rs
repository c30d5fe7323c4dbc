/// OpenAPI definitions.
mod api;

/// Http specific DTOs.
pub mod dto;

/// Route definitions and handlers.
pub mod router;
