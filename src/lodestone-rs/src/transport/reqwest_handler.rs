use anyhow::Context;
use async_trait::async_trait;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use tracing::debug;

use lodestone_core::ClientConfig;

use super::error::TransportError;
use super::{errno, Handler, Method, TransportFailure, TransportRequest, TransportResponse};

/// Native transport engine backed by `reqwest`.
///
/// Completed HTTP exchanges come back as `Success` whatever their status
/// code. Transport failures are reported in-band with this engine's failure
/// code attached, leaving classification to the middleware above.
pub struct ReqwestHandler {
    client: reqwest::Client,
}

impl ReqwestHandler {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build an engine honoring the configured timeouts and TLS settings
    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));

        if config.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if !config.ca_cert_path.is_empty() {
            let pem = std::fs::read(&config.ca_cert_path)
                .with_context(|| format!("Failed to read CA cert from {}", config.ca_cert_path))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .context("Failed to parse CA cert as PEM")?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn failure(error: reqwest::Error) -> TransportFailure {
        let code = failure_code(&error);
        TransportFailure::new(error.to_string(), code).with_source(Box::new(error))
    }
}

impl Default for ReqwestHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for ReqwestHandler {
    async fn perform(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;
        debug!(method = method.as_str(), %url, "performing request");

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes().await {
                    Ok(bytes) => Ok(TransportResponse::Success {
                        status,
                        body: bytes.to_vec(),
                    }),
                    Err(error) => Ok(TransportResponse::Failure(Self::failure(error))),
                }
            }
            Err(error) => Ok(TransportResponse::Failure(Self::failure(error))),
        }
    }
}

/// Derive this engine's failure code for a request error
fn failure_code(error: &reqwest::Error) -> Option<i32> {
    if error.is_timeout() {
        return Some(errno::OPERATION_TIMEDOUT);
    }
    // connect errors without a more specific cause still count as connect
    code_from_chain(error).or_else(|| error.is_connect().then_some(errno::COULDNT_CONNECT))
}

/// Walk an error chain looking for a cause the code table understands
fn code_from_chain(error: &(dyn StdError + 'static)) -> Option<i32> {
    let mut cause = error.source();
    while let Some(current) = cause {
        if let Some(io_error) = current.downcast_ref::<io::Error>() {
            if let Some(code) = code_from_io(io_error) {
                return Some(code);
            }
        }
        // the resolver surfaces name-lookup failures only as formatted text
        let text = current.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return Some(errno::COULDNT_RESOLVE_HOST);
        }
        cause = current.source();
    }
    None
}

fn code_from_io(error: &io::Error) -> Option<i32> {
    match error.kind() {
        io::ErrorKind::TimedOut => Some(errno::OPERATION_TIMEDOUT),
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::NotConnected => Some(errno::COULDNT_CONNECT),
        _ => None,
    }
}
