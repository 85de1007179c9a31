use std::{io, time::Duration};
use thiserror::Error;

/// Failure stages of a certificate inspection
///
/// The display text of every variant is the exact line handed back to the
/// caller, stage prefix included.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Input could not be reduced to a hostname
    #[error("Error: {0}")]
    Parse(String),

    /// TCP connection refused, unreachable or name resolution failed
    #[error("Dial error: dial tcp {address}: {source}")]
    Dial {
        address: String,
        #[source]
        source: io::Error,
    },

    /// TCP connection not established within the connect timeout
    #[error("Dial error: dial tcp {address}: i/o timeout after {}s", .timeout.as_secs_f64())]
    DialTimeout { address: String, timeout: Duration },

    /// TLS negotiation failed
    #[error("Handshake error: {0}")]
    Handshake(#[source] io::Error),

    /// TLS negotiation did not complete within the handshake timeout
    #[error("Handshake error: timed out after {}s", .0.as_secs_f64())]
    HandshakeTimeout(Duration),

    /// Negotiated remote address could not be read from the socket
    #[error("Error: {0}")]
    Address(#[source] io::Error),

    /// Handshake completed but the peer presented no certificate
    #[error("Error: server presented an empty certificate chain")]
    EmptyChain,

    /// Leaf certificate is not valid DER X.509
    #[error("Error: {0}")]
    Certificate(String),
}

/// Stage at which an inspection stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Dial,
    Handshake,
    Address,
    Certificate,
}

impl InspectError {
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Parse(_) => Stage::Parse,
            Self::Dial { .. } | Self::DialTimeout { .. } => Stage::Dial,
            Self::Handshake(_) | Self::HandshakeTimeout(_) => Stage::Handshake,
            Self::Address(_) => Stage::Address,
            Self::EmptyChain | Self::Certificate(_) => Stage::Certificate,
        }
    }
}

impl From<url::ParseError> for InspectError {
    fn from(err: url::ParseError) -> Self {
        Self::Parse(format!("parse {err}"))
    }
}
