use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SlotError;

/// Failure raised by a [`SoapTransport`](crate::SoapTransport) implementation.
///
/// This is the *cause* carried by [`RemoteCallError`]. Transports never hand
/// any other error type to the gateway, so every failure mode of a call is
/// one of these variants. All variants are serializable for structured error
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TransportFault {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The endpoint answered with a non-success HTTP status and no SOAP fault.
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (truncated for logging by the transport).
        body: String,
    },

    /// The remote service reported a SOAP fault.
    Fault {
        /// `faultcode` as sent by the service, e.g. `4013`.
        code: String,
        /// `faultstring` as sent by the service.
        message: String,
        /// Optional `detail` element text.
        detail: Option<String>,
    },

    /// The response could not be decoded (not XML, no body, wrong shape).
    Malformed {
        /// Details about the decoding failure.
        detail: String,
    },

    /// The request could not be encoded.
    Encoding {
        /// Details about the encoding failure.
        detail: String,
    },
}

impl TransportFault {
    /// SOAP-style fault code for this failure.
    ///
    /// Remote faults keep the code sent by the service. Transport-level
    /// failures use `HTTP`, local encoding/decoding problems use `Client`.
    pub fn fault_code(&self) -> &str {
        match self {
            Self::Fault { code, .. } => code,
            Self::Network { .. } | Self::Timeout { .. } | Self::Http { .. } => "HTTP",
            Self::Malformed { .. } | Self::Encoding { .. } => "Client",
        }
    }

    /// Human readable fault message.
    pub fn fault_message(&self) -> String {
        match self {
            Self::Fault { message, .. } => message.clone(),
            Self::Network { detail } => format!("Could not connect to host: {detail}"),
            Self::Timeout { detail } => format!("Request timed out: {detail}"),
            Self::Http { status, .. } => format!("Unexpected HTTP status {status}"),
            Self::Malformed { detail } => format!("Malformed response: {detail}"),
            Self::Encoding { detail } => format!("Could not encode request: {detail}"),
        }
    }

    /// Whether the remote service itself answered (as opposed to the
    /// request never completing). Used for log levels.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Fault { .. })
    }
}

impl std::fmt::Display for TransportFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Http { status, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status}: {body}")
                }
            }
            Self::Fault {
                code,
                message,
                detail,
            } => {
                if let Some(detail) = detail {
                    write!(f, "SOAP fault {code}: {message} ({detail})")
                } else {
                    write!(f, "SOAP fault {code}: {message}")
                }
            }
            Self::Malformed { detail } => write!(f, "Malformed response: {detail}"),
            Self::Encoding { detail } => write!(f, "Encoding error: {detail}"),
        }
    }
}

impl std::error::Error for TransportFault {}

/// Uniform error for every failed remote call.
///
/// Carries the fault code and message (as the service reported them, or as
/// derived from the transport failure) and keeps the original
/// [`TransportFault`] as its [`source`](std::error::Error::source).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct RemoteCallError {
    /// Fault code, e.g. `4013` or `HTTP`.
    pub code: String,
    /// Fault message, e.g. `Authentication failed.`.
    pub message: String,
    /// The underlying failure.
    #[source]
    pub cause: TransportFault,
}

impl From<TransportFault> for RemoteCallError {
    fn from(cause: TransportFault) -> Self {
        Self {
            code: cause.fault_code().to_string(),
            message: cause.fault_message(),
            cause,
        }
    }
}

/// Crate level error type.
///
/// Remote operations themselves only fail with [`RemoteCallError`]; the other
/// variants come from the helpers that interpret a response or build a client.
#[derive(Debug, Error)]
pub enum Error {
    /// A remote call failed.
    #[error(transparent)]
    RemoteCall(#[from] RemoteCallError),

    /// `responsedata` did not have the requested shape.
    #[error("Unexpected response data for '{action}': {detail}")]
    Payload { action: String, detail: String },

    /// The service answered with an in-band error status.
    #[error("{action} failed with status {status} ({statuscode}): {message}")]
    Api {
        action: String,
        status: String,
        statuscode: u32,
        message: String,
    },

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A fixed-arity slot set was used out of range.
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
