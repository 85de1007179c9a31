use super::{
    CertificateReport, InspectConfig, InspectError, VerifyMode, target::server_name_from_host,
};
use log::{debug, warn};
use rustls::{
    ClientConfig, DigitallySignedStruct, SignatureScheme,
    client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
    pki_types::{CertificateDer, ServerName, UnixTime},
};
use std::{
    future::Future,
    sync::{Arc, OnceLock},
    time::Duration,
};
use tokio::{io::AsyncWriteExt, net::TcpStream, time::timeout};
use tokio_rustls::{TlsConnector, client::TlsStream};

static CRYPTO_PROVIDER_INIT: OnceLock<()> = OnceLock::new();

/// Ensure the rustls crypto provider is initialized
///
/// This should be called before any TLS operations. It's safe to call
/// multiple times as initialization only happens once.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER_INIT.get_or_init(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed, keeping it");
        }
    });
}

/// Connect to `host`, complete a TLS handshake under the configured
/// verification mode and report the leaf certificate.
///
/// The TCP socket and TLS session are released before this returns, on
/// success and on every failure after the dial.
///
/// # Errors
///
/// Returns the [`InspectError`] of the first stage that fails.
pub async fn fetch_leaf_certificate(
    host: &str,
    config: &InspectConfig,
) -> Result<CertificateReport, InspectError> {
    let server_name = server_name_from_host(host)?;
    let address = join_host_port(host, config.port);

    debug!("dialing {address} (timeout {:?})", config.connect_timeout);
    let connect = TcpStream::connect((host, config.port));
    let stream = match timeout(config.connect_timeout, connect).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(source)) => return Err(InspectError::Dial { address, source }),
        Err(_) => {
            return Err(InspectError::DialTimeout {
                address,
                timeout: config.connect_timeout,
            });
        }
    };

    let connector = build_tls_connector(config.verify);
    debug!("starting TLS handshake with {address}");
    let mut tls_stream = with_optional_timeout(
        config.handshake_timeout,
        connector.connect(server_name, stream),
    )
    .await
    .ok_or_else(|| {
        InspectError::HandshakeTimeout(config.handshake_timeout.unwrap_or_default())
    })?
    .map_err(InspectError::Handshake)?;

    let report = report_from_tls_stream(&tls_stream);

    // close_notify; the socket itself is closed when the stream drops
    if let Err(err) = tls_stream.shutdown().await {
        warn!("failed to shut down TLS session with {address}: {err}");
    }

    report
}

async fn with_optional_timeout<F: Future>(
    limit: Option<Duration>,
    future: F,
) -> Option<F::Output> {
    match limit {
        Some(limit) => timeout(limit, future).await.ok(),
        None => Some(future.await),
    }
}

fn report_from_tls_stream(
    stream: &TlsStream<TcpStream>,
) -> Result<CertificateReport, InspectError> {
    let (tcp, connection) = stream.get_ref();
    let peer = tcp.peer_addr().map_err(InspectError::Address)?;

    if let Some(version) = connection.protocol_version() {
        debug!("negotiated {version:?} with {peer}");
    }

    let cert = connection
        .peer_certificates()
        .and_then(<[CertificateDer<'_>]>::first)
        .ok_or(InspectError::EmptyChain)?;

    CertificateReport::from_der(peer, cert.as_ref())
}

fn build_tls_connector(verify: VerifyMode) -> TlsConnector {
    ensure_crypto_provider();

    let verifier = match verify {
        VerifyMode::None => Arc::new(NoVerifier),
    };

    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(verifier)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}

fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Custom certificate verifier that accepts any certificate without validation.
///
/// # Security Note
///
/// Inspection must succeed against expired, self-signed and mismatched
/// certificates, so nothing presented by the peer is checked. Connections
/// made with this verifier are only used to read the certificate.
#[derive(Debug)]
struct NoVerifier;

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
        ]
    }
}
