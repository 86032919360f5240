use async_trait::async_trait;

use super::error::{classify, TransportError};
use super::{Handler, TransportRequest, TransportResponse};

/// Middleware that turns in-band transport failures into typed errors.
///
/// Wraps any [`Handler`] and implements the trait itself, so it installs by
/// plain composition around an engine (or around other middleware). Success
/// responses are forwarded untouched and their payload is never inspected;
/// failure markers are replaced by the classified [`TransportError`].
///
/// Holds no state across calls: classification is a pure function of the
/// marker, and a single instance serves any number of concurrent requests.
pub struct ConnectionErrorHandler<H> {
    inner: H,
}

impl<H> ConnectionErrorHandler<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<H: Handler> Handler for ConnectionErrorHandler<H> {
    async fn perform(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        match self.inner.perform(request).await? {
            TransportResponse::Failure(failure) => Err(classify(failure)),
            response => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{errno, Method, TransportErrorKind, TransportFailure};
    use std::error::Error;
    use std::sync::Mutex;

    /// Hands out a single canned response
    struct CannedHandler {
        response: Mutex<Option<TransportResponse>>,
    }

    impl CannedHandler {
        fn new(response: TransportResponse) -> Self {
            Self {
                response: Mutex::new(Some(response)),
            }
        }
    }

    #[async_trait]
    impl Handler for CannedHandler {
        async fn perform(
            &self,
            _request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            Ok(self.response.lock().unwrap().take().expect("single use"))
        }
    }

    fn request() -> TransportRequest {
        TransportRequest::new(
            Method::Get,
            "https://search.example.com/api/as/v1/engines/foo/documents",
        )
    }

    async fn run(response: TransportResponse) -> Result<TransportResponse, TransportError> {
        let handler = ConnectionErrorHandler::new(CannedHandler::new(response));
        handler.perform(request()).await
    }

    #[tokio::test]
    async fn test_success_passes_through_unchanged() {
        let body = br#"{"results":[{"id":"doc-1"}]}"#.to_vec();
        let response = run(TransportResponse::Success {
            status: 200,
            body: body.clone(),
        })
        .await
        .unwrap();

        match response {
            TransportResponse::Success {
                status,
                body: forwarded,
            } => {
                assert_eq!(status, 200);
                assert_eq!(forwarded, body);
            }
            TransportResponse::Failure(_) => panic!("success response was not forwarded"),
        }
    }

    #[tokio::test]
    async fn test_application_errors_are_not_this_layers_concern() {
        // a completed exchange with an error status is still a success here
        let response = run(TransportResponse::Success {
            status: 404,
            body: br#"{"errors":["engine not found"]}"#.to_vec(),
        })
        .await
        .unwrap();
        assert!(matches!(
            response,
            TransportResponse::Success { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_failure_code() {
        let failure = TransportFailure::new(
            "Could not resolve host",
            Some(errno::COULDNT_RESOLVE_HOST),
        );
        let error = run(TransportResponse::Failure(failure)).await.unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::CouldNotResolveHost);
        assert_eq!(error.to_string(), "Could not resolve host");
    }

    #[tokio::test]
    async fn test_connect_failure_code() {
        let failure =
            TransportFailure::new("Failed to connect to host", Some(errno::COULDNT_CONNECT));
        let error = run(TransportResponse::Failure(failure)).await.unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::CouldNotConnectToHost);
    }

    #[tokio::test]
    async fn test_timeout_failure_code() {
        let failure =
            TransportFailure::new("Operation timed out", Some(errno::OPERATION_TIMEDOUT));
        let error = run(TransportResponse::Failure(failure)).await.unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::OperationTimeout);
        assert_eq!(error.to_string(), "Operation timed out");
    }

    #[tokio::test]
    async fn test_unrecognized_code_raises_base_error() {
        let failure = TransportFailure::new("proxy handshake failed", Some(56));
        let error = run(TransportResponse::Failure(failure)).await.unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_absent_code_raises_base_error() {
        let failure = TransportFailure::new("request aborted", None);
        let error = run(TransportResponse::Failure(failure)).await.unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::Connection);
        assert_eq!(error.to_string(), "request aborted");
    }

    #[tokio::test]
    async fn test_root_cause_is_chained() {
        let cause =
            std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed after 10s");
        let failure = TransportFailure::new("Operation timed out", Some(errno::OPERATION_TIMEDOUT))
            .with_source(Box::new(cause));

        let error = run(TransportResponse::Failure(failure)).await.unwrap_err();
        let source = error.source().expect("cause must survive classification");
        assert!(source.to_string().contains("deadline elapsed"));
    }

    #[tokio::test]
    async fn test_stacked_middleware_composes() {
        // wrapping twice must not change what the caller observes
        let inner = CannedHandler::new(TransportResponse::Failure(TransportFailure::new(
            "Operation timed out",
            Some(errno::OPERATION_TIMEDOUT),
        )));
        let stacked = ConnectionErrorHandler::new(ConnectionErrorHandler::new(inner));
        let error = stacked.perform(request()).await.unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::OperationTimeout);
    }
}
