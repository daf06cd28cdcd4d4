//! Server startup and shutdown logic

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::Router;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio::net::TcpListener;
use upstream_config::{ServerConfig, TlsConfig, UpstreamConfig};

use crate::{
    app::{create_app, AppConfig},
    context::AppContext,
};

/// Grace period for in-flight TLS connections after a shutdown signal
const TLS_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Serve plain HTTP on `addr` (e.g. `":8081"`) with default settings
pub async fn serve(addr: &str) -> Result<()> {
    let mut config = UpstreamConfig::default();
    config.server.set_listen_address(addr)?;
    config.server.tls = None;

    Server::new(config).run().await
}

/// Serve HTTPS on `addr` using PEM encoded certificate and key files
pub async fn serve_tls(
    addr: &str,
    cert_file: impl AsRef<Path>,
    key_file: impl AsRef<Path>,
) -> Result<()> {
    let mut config = UpstreamConfig::default();
    config.server.set_listen_address(addr)?;
    config.server.tls = Some(TlsConfig {
        cert_file: cert_file.as_ref().to_string_lossy().into_owned(),
        key_file: key_file.as_ref().to_string_lossy().into_owned(),
    });

    Server::new(config).run().await
}

/// Run `app` on an already bound listener until `shutdown` resolves
pub async fn serve_listener<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

/// Server application struct
pub struct Server {
    config: UpstreamConfig,
    context: AppContext,
}

impl Server {
    /// Create a new server instance; seeds resources and records the start time
    pub fn new(config: UpstreamConfig) -> Self {
        let context = AppContext::from_config(&config.resources);
        Self { config, context }
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_app(self.context.clone(), AppConfig::from(&self.config.server))
    }

    /// Bind the plain HTTP listener; hostnames are resolved and tried in order
    pub async fn bind(&self) -> Result<TcpListener> {
        let target = self.config.server.listen_address();
        TcpListener::bind(target.as_str())
            .await
            .with_context(|| format!("Failed to bind {}", target))
    }

    /// Start the server and block until shutdown or a fatal error
    pub async fn run(self) -> Result<()> {
        let app = self.build_app();

        self.log_config_summary();
        log_route_guide();

        match &self.config.server.tls {
            Some(tls) => {
                let addr = resolve_listen_addr(&self.config.server).await?;
                run_tls(addr, app, tls).await?
            }
            None => {
                let listener = self.bind().await?;
                tracing::info!("Server listening on http://{}", listener.local_addr()?);
                serve_listener(listener, app, shutdown_signal()).await?;
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let server = &self.config.server;
        let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };

        tracing::info!("=== Upstream Server Configuration ===");
        tracing::info!("Bind Address: {}:{}", server.bind_address, server.port);
        tracing::info!(
            "TLS: {}",
            server
                .tls
                .as_ref()
                .map(|tls| format!("Enabled ({}, {})", tls.cert_file, tls.key_file))
                .unwrap_or_else(|| "Disabled".to_string())
        );
        tracing::info!("Request ID: {}", enabled(server.enable_request_id));
        tracing::info!("Tracing: {}", enabled(server.enable_tracing));
        tracing::info!(
            "Resources: {} seeded, default page size {}",
            self.context.store.len(),
            self.context.default_limit
        );
        tracing::info!("Started At: {}", self.context.simulator.started_at().to_rfc3339());
        tracing::info!("=====================================");
    }
}

/// Resolve the configured `host:port` to the first address it names
pub async fn resolve_listen_addr(server: &ServerConfig) -> Result<SocketAddr> {
    let target = server.listen_address();
    let addr = tokio::net::lookup_host(target.as_str())
        .await
        .with_context(|| format!("Failed to resolve {}", target))?
        .next()
        .ok_or_else(|| anyhow!("{} did not resolve to any address", target));
    addr
}

async fn run_tls(addr: SocketAddr, app: Router, tls: &TlsConfig) -> Result<()> {
    // Several rustls providers can be compiled in; pin one for the process
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    }

    let rustls_config = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
        .await
        .with_context(|| {
            format!(
                "Failed to load TLS certificate '{}' and key '{}'",
                tls.cert_file, tls.key_file
            )
        })?;

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(TLS_SHUTDOWN_GRACE));
    });

    tracing::info!("Server listening on https://{}", addr);
    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("HTTPS server failed")
}

/// Log which endpoints exist and how the delay headers behave
fn log_route_guide() {
    let example_from = (chrono::Utc::now() + chrono::Duration::minutes(1)).to_rfc3339();

    tracing::info!("GET /json/{{kind}}");
    tracing::info!("    /json/valid     returns a valid json response");
    tracing::info!("    /json/invalid   returns an invalid json response");
    tracing::info!("    HEADER X-Delay: 200ms");
    tracing::info!("        -> responds in 200ms");
    tracing::info!("    HEADER X-Delay: 200ms, X-Delay-Percent: 25");
    tracing::info!("        -> responds in 200ms for roughly a quarter of requests");
    tracing::info!("    HEADER X-Delay: 200ms, X-Slowdown: 300ms, X-Slowdown-From: <RFC 3339>");
    tracing::info!(
        "        -> responds in 200ms, plus 300ms once the server started after the given instant (e.g. {})",
        example_from
    );
    tracing::info!("GET /delay/{{duration}}   sleeps, then responds with an empty 200");
    tracing::info!("GET /xml                 sample XML document");
    tracing::info!("POST /soap               stub, empty 200");
    tracing::info!("ANY /size/{{size}}        random letters, e.g. /size/1K or /size/6GB");
    tracing::info!("GET /resource?limit=n    first n resources");
    tracing::info!("GET /resource/{{id}}      single resource");
}

/// Graceful shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
