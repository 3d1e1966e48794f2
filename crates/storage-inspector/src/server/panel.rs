use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::render::PanelView;
use crate::server::error::ApiError;
use crate::server::ServerState;

#[derive(Debug, Deserialize)]
pub struct StorageRequest {
    pub storage: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub action: String,
    #[serde(default)]
    pub keyword: String,
}

pub(crate) async fn view(State(state): State<Arc<ServerState>>) -> Json<PanelView> {
    Json(state.renderer.view())
}

pub(crate) async fn reload(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<PanelView>, ApiError> {
    state.controller.reload().await?;
    Ok(Json(state.renderer.view()))
}

pub(crate) async fn switch_storage(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<StorageRequest>,
) -> Result<Json<PanelView>, ApiError> {
    state.controller.switch_storage(&request.storage).await?;
    Ok(Json(state.renderer.view()))
}

pub(crate) async fn select(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<KeyRequest>,
) -> Result<Json<PanelView>, ApiError> {
    state.controller.show_key(&request.key)?;
    Ok(Json(state.renderer.view()))
}

pub(crate) async fn remove(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<KeyRequest>,
) -> Result<Json<PanelView>, ApiError> {
    state.controller.remove_key(&request.key).await?;
    Ok(Json(state.renderer.view()))
}

pub(crate) async fn clear(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<PanelView>, ApiError> {
    state.controller.clear_storage().await?;
    Ok(Json(state.renderer.view()))
}

pub(crate) async fn search(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SearchRequest>,
) -> Json<PanelView> {
    state.controller.search(&request.action, &request.keyword);
    Json(state.renderer.view())
}
