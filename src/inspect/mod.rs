//! Leaf certificate inspection
//!
//! Reduces a loosely formatted host or URL to a hostname, connects to it,
//! completes a TLS handshake without verifying the peer and reports the first
//! certificate of the presented chain.
//!
//! # Module Organization
//!
//! - `config` - Inspection settings and verification mode
//! - `target` - Input normalization and hostname resolution
//! - `probe` - TCP dial, TLS handshake and leaf extraction
//! - `report` - Reported certificate fields and their text layout
//! - `error` - Failure stages
//!
//! # Example
//!
//! ```rust,ignore
//! use certinfo::inspect::{InspectConfig, Inspector};
//!
//! let inspector = Inspector::new(InspectConfig::default());
//! let text = inspector.inspect(b"https://www.google.com/about/").await;
//! print!("{text}");
//! ```

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod target;

// Re-export commonly used types
pub use config::{HostnameMode, InspectConfig, VerifyMode};
pub use error::{InspectError, Stage};
pub use probe::{ensure_crypto_provider, fetch_leaf_certificate};
pub use report::CertificateReport;
pub use target::resolve_hostname;

use log::{debug, info};

/// Inspect `request` with the default configuration
///
/// Returns the text report, or the error line of the stage that failed.
pub async fn inspect(request: &[u8]) -> String {
    Inspector::default().inspect(request).await
}

/// Runs certificate inspections with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    config: InspectConfig,
}

impl Inspector {
    #[must_use]
    pub const fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Inspect `request` and render the outcome as text
    ///
    /// Every failure is turned into its error line; callers tell success from
    /// failure by the text alone.
    pub async fn inspect(&self, request: &[u8]) -> String {
        match self.inspect_report(request).await {
            Ok(report) => report.to_string(),
            Err(err) => err.to_string(),
        }
    }

    /// Inspect `request` and return the structured report
    ///
    /// # Errors
    ///
    /// Returns the [`InspectError`] of the first stage that fails. Parse
    /// failures happen before any network activity.
    pub async fn inspect_report(&self, request: &[u8]) -> Result<CertificateReport, InspectError> {
        let input = String::from_utf8_lossy(request);
        let host = resolve_hostname(&input, self.config.hostname)?;
        debug!("resolved {:?} to host {host}", input.trim());

        let report = fetch_leaf_certificate(&host, &self.config).await?;
        info!(
            "{host}: issuer {:?}, subject {:?}, expires {}",
            report.issuer, report.common_name, report.not_after
        );

        Ok(report)
    }
}
