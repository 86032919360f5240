//! Lodestone Core Library
//!
//! Shared types for the Lodestone search service client:
//! - API payload models (engines, documents, schema, search)
//! - Client configuration

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use models::*;
