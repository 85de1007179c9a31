use crate::inspect::Inspector;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use log::{info, warn};
use std::{net::IpAddr, sync::Arc};
use tokio::net::TcpListener;

/// Start the HTTP function endpoint
///
/// Each `POST /` body is handed to the inspector as the raw request and the
/// resulting text (report or error line) is returned with `200 OK`.
///
/// # Errors
///
/// Returns an error if the service fails to bind to the port or stops serving
pub async fn start(listen: Option<IpAddr>, port: u16, inspector: Inspector) -> anyhow::Result<()> {
    let app = router(inspector);

    // Bind to socket with smart fallback
    let (listener, bind_addr) = match listen {
        Some(addr) => {
            // Explicit address specified - bind to it
            let socket_addr = format!("{addr}:{port}");
            let listener = TcpListener::bind(&socket_addr).await?;
            (listener, socket_addr)
        }
        None => {
            // Auto mode: try IPv6 first, fallback to IPv4
            if let Ok(l) = TcpListener::bind(format!("[::]:{port}")).await {
                (l, format!("[::]:{port}"))
            } else {
                let socket_addr = format!("0.0.0.0:{port}");
                (TcpListener::bind(&socket_addr).await?, socket_addr)
            }
        }
    };

    info!("Listening on {bind_addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");

    Ok(())
}

/// Routes of the function endpoint
#[must_use]
pub fn router(inspector: Inspector) -> Router {
    Router::new()
        .route("/", post(inspect_handler))
        .with_state(Arc::new(inspector))
}

async fn inspect_handler(
    State(inspector): State<Arc<Inspector>>,
    body: Bytes,
) -> impl IntoResponse {
    let text = inspector.inspect(&body).await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
