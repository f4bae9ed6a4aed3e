//! HTTP surface for the task board.
//!
//! Routes live under `/api/tasks` and answer with JSON envelopes:
//! `{"success": true, "data": ...}` on success and
//! `{"success": false, "error": "..."}` on failure.

mod error;
mod handlers;
mod routes;

pub use error::{ApiError, ServeError};
pub use routes::{router, with_middleware};

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds `addr` and returns the listener with its resolved local address.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] when the address cannot be bound.
pub async fn bind(addr: &str) -> Result<(TcpListener, SocketAddr), ServeError> {
    let listener = TcpListener::bind(addr).await.map_err(ServeError::Bind)?;
    let local_addr = listener.local_addr().map_err(ServeError::Bind)?;
    Ok((listener, local_addr))
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServeError::Serve`] when the server loop fails.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServeError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Serve)
}
