//! Catalog service runtime.
//!
//! [`ServerHandle`] owns the server lifecycle: storage, the catalog service,
//! the metrics recorder, the REST API listener and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::application::CatalogService;
use crate::config::AppConfig;
use crate::infrastructure::open_repository;
use crate::interfaces::http::create_api_router;
use crate::support::errors::{AppError, InfraError};
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Handle to a running catalog service.
///
/// ```rust,no_run
/// use catalog_service::config::AppConfig;
/// use catalog_service::server::ServerHandle;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(AppConfig::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,
    pub catalog: Arc<CatalogService>,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global metrics recorder can only be installed once per process,
/// so restarts within one process reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

impl ServerHandle {
    /// Open the catalog, build the router and start serving.
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        info!("Starting catalog service...");

        let prometheus = prometheus_handle();

        let catalog_cfg = &config.catalog;
        let repository = open_repository(catalog_cfg.data_path.as_deref()).await?;
        let catalog = Arc::new(
            CatalogService::new(repository, catalog_cfg.resolver())
                .with_categories(&catalog_cfg.categories),
        );

        let router = create_api_router(Arc::clone(&catalog), prometheus);

        let addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(InfraError::from)?;
        let local_addr = listener.local_addr().map_err(InfraError::from)?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            catalog,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `shutdown_timeout` seconds before the server
    /// task is aborted.
    pub async fn wait(self) {
        info!("⏳ Waiting for in-flight requests to complete...");

        let timeout = self.shutdown.timeout();
        let mut api_task = self.api_task;
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!(
                    "⚠️ Graceful shutdown timed out after {}s, aborting",
                    timeout.as_secs()
                );
                api_task.abort();
            }
        }

        info!("👋 Catalog service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down catalog service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_config(data_path: Option<std::path::PathBuf>) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.catalog.data_path = data_path;
        config
    }

    async fn http_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_catalog_from_json_file_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products": [
                {"id": 1, "title": "Lipstick", "category": "beauty", "price": 12.0},
                {"id": 2, "title": "Rice", "category": "groceries", "price": 3.0}
            ]}"#,
        )
        .unwrap();

        let handle = ServerHandle::start(test_config(Some(path))).await.unwrap();
        assert!(handle.is_running());

        let response = http_get(handle.local_addr, "/products?category=beauty").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.to_lowercase().contains("x-total-count: 1"));
        assert!(response.contains("Lipstick"));

        let response = http_get(handle.local_addr, "/metrics").await;
        assert!(response.starts_with("HTTP/1.1 200"));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let mut config = test_config(None);
        config.catalog.default_page_size_all = 0;
        let err = ServerHandle::start(config).await.err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
