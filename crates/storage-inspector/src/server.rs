use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::browser::BrowserBridge;
use crate::error::{InspectorError, InspectorResult};
use crate::render::PanelRenderer;
use crate::settings::{FileSettings, SharedSettings};
use crate::storage::RemoteStorageAccessor;
use crate::view::StorageViewController;

pub mod browser;
pub mod error;
pub mod panel;
pub mod settings;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub settings_dir: PathBuf,
    /// `None` lets an evaluation wait for the extension forever.
    pub eval_timeout: Option<Duration>,
}

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    pub async fn new(config: ServerConfig) -> InspectorResult<Self> {
        let settings: SharedSettings = Arc::new(FileSettings::load_or_create(&config.settings_dir)?);
        let browser = Arc::new(BrowserBridge::new(config.eval_timeout));
        let renderer = Arc::new(PanelRenderer::new());
        let controller = Arc::new(StorageViewController::new(
            RemoteStorageAccessor::new(browser.clone()),
            renderer.clone(),
            settings.clone(),
        ));
        let state = Arc::new(ServerState {
            browser,
            controller,
            renderer,
            settings,
        });

        let listener = TcpListener::bind(config.addr)
            .await
            .map_err(|error| InspectorError::Internal(format!("failed to bind {}: {error}", config.addr)))?;
        let addr = listener
            .local_addr()
            .map_err(|error| InspectorError::Internal(error.to_string()))?;
        let app = router(state);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("server stopped: {error}");
            }
        });
        tracing::info!("storage inspector listening on {addr}");

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> InspectorResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| InspectorError::Internal("failed to send server shutdown signal".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

pub(crate) fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(health))
        .route("/browser/ws", get(browser::ws_handler))
        .route("/browser/status", get(browser::status))
        .route("/panel", get(panel::view))
        .route("/panel/reload", post(panel::reload))
        .route("/panel/storage", post(panel::switch_storage))
        .route("/panel/select", post(panel::select))
        .route("/panel/remove", post(panel::remove))
        .route("/panel/clear", post(panel::clear))
        .route("/panel/search", post(panel::search))
        .route("/settings", get(settings::preferences))
        .route("/settings/theme", post(settings::set_theme))
        .with_state(state)
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) browser: Arc<BrowserBridge>,
    pub(crate) controller: Arc<StorageViewController>,
    pub(crate) renderer: Arc<PanelRenderer>,
    pub(crate) settings: SharedSettings,
}

/// Server state with an unconnected bridge and in-memory settings.
#[cfg(test)]
pub(crate) fn disconnected_state() -> Arc<ServerState> {
    let browser = Arc::new(BrowserBridge::new(None));
    let renderer = Arc::new(PanelRenderer::new());
    let settings: SharedSettings = Arc::new(crate::settings::MemorySettings::new());
    let controller = Arc::new(StorageViewController::new(
        RemoteStorageAccessor::new(browser.clone()),
        renderer.clone(),
        settings.clone(),
    ));
    Arc::new(ServerState {
        browser,
        controller,
        renderer,
        settings,
    })
}
