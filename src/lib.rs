//! Expenseur is a multi-user expense tracking server.
//!
//! This library provides a JSON REST API for registering users, managing
//! income/expense categories and transactions, and computing monthly
//! income/expense/balance summaries. Authentication uses signed, time-limited
//! bearer tokens; every resource is isolated per user via ownership checks.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod auth;
mod category;
pub mod db;
mod endpoints;
mod error;
mod log_in;
mod logging;
pub mod models;
mod pagination;
mod register_user;
mod routing;
mod state;
pub mod stores;
mod transaction;
mod user;
mod validate_token;

pub use error::{Error, attach_error_path};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
