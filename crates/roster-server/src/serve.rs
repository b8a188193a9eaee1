// ABOUTME: Serve loop with bounded graceful shutdown for the roster HTTP server.
// ABOUTME: Waits for a stop trigger, drains in-flight requests up to a deadline, then stops accepting.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Errors that can occur while serving.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// How the server stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection finished and the router was dropped.
    Drained,
    /// The grace period ran out. The accept loop was aborted, but connection
    /// tasks already spawned keep running, along with the state they hold,
    /// until they finish or the runtime stops.
    Forced,
}

/// Serve `router` on `listener` until `shutdown` resolves, then give
/// in-flight requests up to `grace` to finish.
///
/// On `Drained` the router and its state are gone when this returns. On
/// `Forced` only the accept loop is stopped.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    grace: Duration,
) -> Result<ShutdownOutcome, ServeError>
where
    F: Future<Output = ()>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut task = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut task => {
            tracing::warn!("server stopped before a shutdown signal");
            joined??;
            return Ok(ShutdownOutcome::Drained);
        }
        _ = shutdown => {
            tracing::info!("shutting down server");
        }
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(grace, &mut task).await {
        Ok(joined) => {
            joined??;
            tracing::info!("server shutdown successfully");
            Ok(ShutdownOutcome::Drained)
        }
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs_f64(),
                "in-flight requests did not finish in time; no longer accepting connections"
            );
            task.abort();
            Ok(ShutdownOutcome::Forced)
        }
    }
}

/// Drop `handle` if it is the last reference and report whether the value
/// was released. Returns false while any other clone is still alive.
pub fn release<T>(handle: Arc<T>) -> bool {
    match Arc::into_inner(handle) {
        Some(inner) => {
            drop(inner);
            true
        }
        None => false,
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
