use std::{str::FromStr, time::Duration};

/// Default port probed when the configuration does not override it
pub const DEFAULT_PORT: u16 = 443;

/// Default bound on establishing the TCP connection (name resolution included)
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Settings for a certificate inspection
#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub verify: VerifyMode,
    pub hostname: HostnameMode,
    pub port: u16,
    pub connect_timeout: Duration,
    /// `None` leaves the handshake unbounded
    pub handshake_timeout: Option<Duration>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            verify: VerifyMode::default(),
            hostname: HostnameMode::default(),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            handshake_timeout: None,
        }
    }
}

/// Certificate verification applied during the handshake
///
/// Inspection has to complete against expired, self-signed or otherwise
/// untrusted certificates, so the only mode is observation-only trust. It is
/// kept as an explicit setting so callers opt in to it knowingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyMode {
    /// Accept whatever certificate the peer presents
    #[default]
    None,
}

impl FromStr for VerifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid verify mode: {s}")),
        }
    }
}

/// How raw input is reduced to a hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostnameMode {
    /// Accept a bare hostname or a URL-like string (scheme, path, query)
    #[default]
    Url,
    /// Treat the whole input as a hostname
    Bare,
}

impl FromStr for HostnameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "bare" => Ok(Self::Bare),
            _ => Err(format!("Invalid hostname mode: {s}")),
        }
    }
}
