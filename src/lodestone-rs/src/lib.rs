//! Lodestone Client Library
//!
//! HTTP client for Lodestone search service deployments: engine management,
//! document indexing and retrieval, schema updates, and search.
//!
//! Transport failures (resolution, connect, timeout) surface as typed
//! [`TransportError`] variants classified by the middleware in [`transport`];
//! application-level errors returned by the service surface as the other
//! [`ClientError`] variants.

mod client;
pub mod transport;

pub use client::Client;
pub use lodestone_core::models::{
    DeleteDocumentResult, DocumentIndexResult, DocumentListResponse, Engine, EngineListResponse,
    FieldType, Page, Schema, SearchQuery, SearchResponse,
};
pub use lodestone_core::ClientConfig;
pub use transport::{TransportError, TransportErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
