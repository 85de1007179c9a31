use super::InspectError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{fmt, net::SocketAddr};
use x509_parser::{
    extensions::{GeneralName, ParsedExtension},
    prelude::{FromDer, X509Certificate},
    time::ASN1Time,
};

/// Fields reported for the leaf certificate of a completed handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateReport {
    /// Negotiated peer IP address
    pub host: String,
    /// Negotiated peer port
    pub port: u16,
    /// Issuer common name (empty when the issuer has none)
    pub issuer: String,
    /// Subject common name (empty when the subject has none)
    pub common_name: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// DNS subject alternative names, in certificate order
    pub sans: Vec<String>,
}

impl CertificateReport {
    /// Build the report from the peer address and the DER-encoded leaf certificate
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Certificate`] if the certificate cannot be parsed
    /// or carries a validity timestamp outside the representable range.
    pub fn from_der(peer: SocketAddr, cert_der: &[u8]) -> Result<Self, InspectError> {
        let (_, cert) = X509Certificate::from_der(cert_der)
            .map_err(|e| InspectError::Certificate(format!("failed to parse certificate: {e}")))?;

        let validity = cert.validity();

        Ok(Self {
            host: peer.ip().to_string(),
            port: peer.port(),
            issuer: common_name(cert.issuer().iter_common_name().next()),
            common_name: common_name(cert.subject().iter_common_name().next()),
            not_before: to_utc(&validity.not_before)?,
            not_after: to_utc(&validity.not_after)?,
            sans: dns_sans(&cert),
        })
    }
}

impl fmt::Display for CertificateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host {}", self.host)?;
        writeln!(f, "Port {}", self.port)?;
        writeln!(f, "Issuer {}", self.issuer)?;
        writeln!(f, "CommonName {}", self.common_name)?;
        writeln!(f, "NotBefore {}", self.not_before)?;
        writeln!(f, "NotAfter {}", self.not_after)?;
        writeln!(f, "SANs [{}]", self.sans.join(", "))
    }
}

fn common_name(attr: Option<&x509_parser::x509::AttributeTypeAndValue<'_>>) -> String {
    attr.and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn to_utc(time: &ASN1Time) -> Result<DateTime<Utc>, InspectError> {
    let raw = time.to_datetime();
    DateTime::<Utc>::from_timestamp(raw.unix_timestamp(), raw.nanosecond())
        .ok_or_else(|| InspectError::Certificate(format!("invalid certificate timestamp: {time}")))
}

// only DNS names; IP, email and URI entries are skipped
fn dns_sans(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for name in &san.general_names {
                if let GeneralName::DNSName(dns) = name {
                    sans.push((*dns).to_string());
                }
            }
        }
    }

    sans
}
