use super::{errno, FailureSource, TransportFailure};

/// Classified transport failure.
///
/// `Connection` is the base kind: every failure the code table does not
/// recognize lands there, so matching on the type as a whole catches all
/// transport failures while the named variants support differentiated
/// handling (retry a timeout, fail fast on a resolution failure).
///
/// The display message is the engine's original failure message, and the
/// engine's root cause stays reachable through `std::error::Error::source`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The target host name could not be resolved
    #[error("{message}")]
    CouldNotResolveHost {
        message: String,
        #[source]
        source: Option<FailureSource>,
    },

    /// The host resolved but no connection could be established
    #[error("{message}")]
    CouldNotConnectToHost {
        message: String,
        #[source]
        source: Option<FailureSource>,
    },

    /// The operation exceeded its deadline
    #[error("{message}")]
    OperationTimeout {
        message: String,
        #[source]
        source: Option<FailureSource>,
    },

    /// Any transport failure not otherwise classified
    #[error("{message}")]
    Connection {
        message: String,
        #[source]
        source: Option<FailureSource>,
    },
}

/// Discriminant of a [`TransportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    CouldNotResolveHost,
    CouldNotConnectToHost,
    OperationTimeout,
    Connection,
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::CouldNotResolveHost { .. } => TransportErrorKind::CouldNotResolveHost,
            TransportError::CouldNotConnectToHost { .. } => {
                TransportErrorKind::CouldNotConnectToHost
            }
            TransportError::OperationTimeout { .. } => TransportErrorKind::OperationTimeout,
            TransportError::Connection { .. } => TransportErrorKind::Connection,
        }
    }

    /// The engine's original failure message, verbatim
    pub fn message(&self) -> &str {
        match self {
            TransportError::CouldNotResolveHost { message, .. }
            | TransportError::CouldNotConnectToHost { message, .. }
            | TransportError::OperationTimeout { message, .. }
            | TransportError::Connection { message, .. } => message,
        }
    }
}

/// Map a failure marker onto exactly one classified error.
///
/// Pure function of the marker's code. Unrecognized and absent codes both
/// land on the base `Connection` kind, so no failure marker can leave the
/// transport layer unwrapped.
pub(crate) fn classify(failure: TransportFailure) -> TransportError {
    let TransportFailure {
        message,
        code,
        source,
    } = failure;
    match code {
        Some(errno::COULDNT_RESOLVE_HOST) => TransportError::CouldNotResolveHost { message, source },
        Some(errno::COULDNT_CONNECT) => TransportError::CouldNotConnectToHost { message, source },
        Some(errno::OPERATION_TIMEDOUT) => TransportError::OperationTimeout { message, source },
        _ => TransportError::Connection { message, source },
    }
}
