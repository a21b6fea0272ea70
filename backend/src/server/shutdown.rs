//! Graceful shutdown: fail liveness first, then drain in-flight requests.

use std::future::Future;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{error, info};

use users_backend::inbound::http::health::HealthState;

/// Resolve on Ctrl-C, or on `SIGTERM` where the platform has it.
///
/// A listener that cannot be installed never resolves, so a broken handler
/// does not stop the server on its own.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Wait for `signal`, mark the service unhealthy and stop the server.
///
/// Liveness probes answer 503 from this point on, while requests already
/// accepted are allowed to finish.
pub async fn drain_on<F>(signal: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}
