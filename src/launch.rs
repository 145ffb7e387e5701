use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{async_trait, BoxError, Router};
use thiserror::Error;
use tokio::signal;
use tracing::Level;

use crate::config::{Config, ConfigError};

/// How the application object gets served: bind address, port, the dev-mode
/// auto-reload flag and the log verbosity handed to the runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct ServeOptions {
    pub host: IpAddr,
    pub port: u16,
    pub reload: bool,
    pub log_level: Level,
}

impl Default for ServeOptions {
    fn default() -> Self {
        ServeOptions {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            reload: true,
            log_level: Level::INFO,
        }
    }
}

impl ServeOptions {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("server runtime failed: {0}")]
    Server(BoxError),
}

/// The server runtime the launcher delegates to. The production
/// implementation does not return until the process is shut down; tests
/// substitute a recording double instead of opening a listener.
#[async_trait]
pub trait ServerRuntime {
    async fn serve(&self, app: Router, opts: &ServeOptions) -> Result<(), BoxError>;
}

/// Serves the application object with axum, shutting down gracefully on
/// SIGTERM or ctrl-c. File-watch restarts implied by `reload` are owned by
/// the supervising dev runner, not by this process.
pub struct AxumServer;

#[async_trait]
impl ServerRuntime for AxumServer {
    async fn serve(&self, app: Router, opts: &ServeOptions) -> Result<(), BoxError> {
        if opts.reload {
            tracing::info!("auto-reload requested; restarts are handled by the dev runner");
        }
        tracing::info!(addr = %opts.addr(), "binding");

        axum::Server::bind(&opts.addr())
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// The startup status lines, on stdout where the operator expects them.
pub fn print_banner(opts: &ServeOptions) {
    println!("🚀 Starting LiveKit Token Server...");
    println!("📍 Server will be available at: http://localhost:{}", opts.port);
    println!("🔗 Health check: http://localhost:{}/health", opts.port);
    println!("🎤 Token endpoint: http://localhost:{}/api/token", opts.port);
}

/// Preflight, banner, then exactly one runtime invocation. If a required
/// credential is missing the runtime is never reached and the error carries
/// the names of the offenders. With the real [`AxumServer`] this does not
/// return under normal operation.
pub async fn run<R: ServerRuntime>(
    env: &HashMap<String, String>,
    app: Router,
    runtime: &R,
    opts: ServeOptions,
) -> Result<(), LaunchError> {
    let _config = Config::from_snapshot(env)?;
    print_banner(&opts);
    runtime.serve(app, &opts).await.map_err(LaunchError::Server)
}
