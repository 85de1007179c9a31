//! Inspect the leaf TLS certificate presented by a remote host
//!
//! The certificate is read from a handshake that does not verify the peer,
//! so expired, self-signed and mismatched certificates are reported as well.

pub mod cli;
pub mod inspect;
pub mod serve;

pub use inspect::{CertificateReport, InspectConfig, InspectError, Inspector, inspect};
