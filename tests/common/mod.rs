#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use certinfo::inspect::{InspectConfig, ensure_crypto_provider};
use rcgen::{CertificateParams, DnType, KeyPair, date_time_ymd};
use rustls::{
    ServerConfig,
    pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer},
};
use std::{env, net::SocketAddr, sync::Arc};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};
use tokio_rustls::TlsAcceptor;

pub const REPORT_LABELS: [&str; 7] = [
    "Host",
    "Port",
    "Issuer",
    "CommonName",
    "NotBefore",
    "NotAfter",
    "SANs",
];

pub fn skip_if_no_network() -> bool {
    env::var("SKIP_NETWORK_TESTS").is_ok()
}

/// Inspection settings pointing at a local test server
pub fn local_config(addr: SocketAddr) -> InspectConfig {
    InspectConfig {
        port: addr.port(),
        ..InspectConfig::default()
    }
}

/// Assert `text` is a complete report: every label in order, each with a value
pub fn assert_report_shape(text: &str) {
    assert!(text.ends_with('\n'), "report must end with a newline: {text:?}");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), REPORT_LABELS.len(), "unexpected report: {text}");

    for (line, label) in lines.iter().zip(REPORT_LABELS) {
        let value = line
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(' '))
            .unwrap_or_else(|| panic!("expected {label} line, got {line:?}"));
        assert!(!value.trim().is_empty(), "empty {label} in {text}");
    }
}

/// Value of the `label` line of a report
pub fn report_field<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.lines()
        .find_map(|line| line.strip_prefix(label)?.strip_prefix(' '))
}

pub struct TestCertificate {
    pub chain: Vec<CertificateDer<'static>>,
    pub key: PrivateKeyDer<'static>,
}

/// Self-signed certificate whose common name is the first of `names`
pub fn self_signed(names: &[&str]) -> TestCertificate {
    let key = KeyPair::generate().unwrap();
    let sans: Vec<String> = names.iter().map(|name| (*name).to_string()).collect();
    let mut params = CertificateParams::new(sans).unwrap();
    params.distinguished_name.push(
        DnType::CommonName,
        names.first().copied().unwrap_or("certinfo test"),
    );
    params.not_before = date_time_ymd(2024, 1, 15);
    params.not_after = date_time_ymd(2034, 1, 15);
    let cert = params.self_signed(&key).unwrap();

    TestCertificate {
        chain: vec![cert.der().clone()],
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der())),
    }
}

/// TLS server on 127.0.0.1 accepting `connections` handshakes
///
/// After each handshake the server waits for the client to go away. The
/// handle resolves to the number of connections the client closed.
pub async fn spawn_tls_server(
    cert: TestCertificate,
    connections: usize,
) -> (SocketAddr, JoinHandle<usize>) {
    ensure_crypto_provider();

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(cert.chain, cert.key)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut closed = 0;
        for _ in 0..connections {
            let (stream, _) = listener.accept().await.unwrap();
            let mut tls = acceptor.accept(stream).await.unwrap();
            let mut buf = [0u8; 64];
            // close_notify yields Ok(0), a bare FIN an unexpected-eof error
            if matches!(tls.read(&mut buf).await, Ok(0) | Err(_)) {
                closed += 1;
            }
        }
        closed
    });

    (addr, handle)
}

/// Plain TCP server answering whatever it receives with an HTTP error
pub async fn spawn_plain_http_server() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 512];
        let _ = stream.read(&mut buf).await;
        let _ = stream
            .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
            .await;
    });

    (addr, handle)
}

/// TCP server that accepts a connection and never speaks
pub async fn spawn_silent_server() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 512];
        // hold the connection until the client gives up
        while matches!(stream.read(&mut buf).await, Ok(n) if n > 0) {}
    });

    (addr, handle)
}
