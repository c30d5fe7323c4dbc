//! The core module defines the business logic of lexis.
//! It provides the traits and models upstream adapters need to implement.

pub mod context;
pub mod interpreter;
pub mod model;
pub mod provider;
pub mod rank;
pub mod segment;
pub mod service;
pub mod session;
pub mod store;
