//! Transport layer: request/response descriptors, the handler seam, and the
//! failure-classification middleware.
//!
//! Engines (the handlers that actually move bytes) report transport failures
//! in-band as [`TransportResponse::Failure`] instead of returning `Err`;
//! [`ConnectionErrorHandler`] sits above them and converts those markers into
//! typed [`TransportError`] values. Completed HTTP exchanges pass through
//! untouched whatever their status code.

mod error;
mod error_handler;
mod reqwest_handler;

pub use error::{TransportError, TransportErrorKind};
pub use error_handler::ConnectionErrorHandler;
pub use reqwest_handler::ReqwestHandler;

pub(crate) use error::classify;

use async_trait::async_trait;

/// Failure codes attached by transport engines.
///
/// Numbering follows libcurl's errno values so curl-backed engines map onto
/// the same table. Supporting a new engine means adding constants here and
/// arms to `classify`, nothing else.
pub mod errno {
    pub const COULDNT_RESOLVE_HOST: i32 = 6;
    pub const COULDNT_CONNECT: i32 = 7;
    pub const OPERATION_TIMEDOUT: i32 = 28;
}

/// HTTP method of an outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Immutable descriptor of an outbound call.
///
/// Built by the client, carried through the handler stack unchanged.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Boxed root cause kept alive inside a failure marker
pub type FailureSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure marker reported in-band by a transport engine.
///
/// `code` is the engine's own numbering (see [`errno`]); engines that cannot
/// tell failures apart leave it empty and the failure classifies as the base
/// connection error.
#[derive(Debug)]
pub struct TransportFailure {
    pub message: String,
    pub code: Option<i32>,
    pub source: Option<FailureSource>,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>, code: Option<i32>) -> Self {
        Self {
            message: message.into(),
            code,
            source: None,
        }
    }

    pub fn with_source(mut self, source: FailureSource) -> Self {
        self.source = Some(source);
        self
    }
}

/// Outcome of one transport exchange.
///
/// A completed HTTP exchange is `Success` whatever its status code; `Failure`
/// means the exchange itself never completed. The two are mutually exclusive
/// by construction.
#[derive(Debug)]
pub enum TransportResponse {
    Success { status: u16, body: Vec<u8> },
    Failure(TransportFailure),
}

/// A transport handler performs an outbound call.
///
/// Middleware wraps another handler and implements this same trait, so stacks
/// compose by construction. Handlers hold no per-request state and may serve
/// any number of concurrent calls.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn perform(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError>;
}
