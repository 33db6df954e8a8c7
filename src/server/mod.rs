//! HTTP service: grammar check, health, and language list routes.

mod error;
mod handlers;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::core::gateway::CompletionGateway;
use crate::core::turnstile::HumanVerifier;

/// Shared, immutable handler state.
pub struct AppState<G, V> {
    pub gateway: G,
    pub verifier: V,
}

/// Build the router over `state`.
pub fn router<G, V>(state: Arc<AppState<G, V>>) -> Router
where
    G: CompletionGateway + 'static,
    V: HumanVerifier + 'static,
{
    Router::new()
        .route("/api/grammar-check", post(handlers::grammar_check::<G, V>))
        .route("/api/health", get(handlers::health))
        .route("/api/languages", get(handlers::list_languages))
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` is cancelled.
pub async fn serve<G, V>(
    addr: SocketAddr,
    state: AppState<G, V>,
    shutdown: CancellationToken,
) -> io::Result<()>
where
    G: CompletionGateway + 'static,
    V: HumanVerifier + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    log::info!("Server stopped");
    Ok(())
}
