use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::settings::{PanelPreferences, Theme};

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

pub(crate) async fn preferences(State(state): State<Arc<ServerState>>) -> Json<PanelPreferences> {
    Json(PanelPreferences::load(state.settings.as_ref()))
}

pub(crate) async fn set_theme(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<PanelPreferences>, ApiError> {
    let theme = Theme::parse(&request.theme);
    PanelPreferences::save_theme(state.settings.as_ref(), theme)?;
    tracing::debug!(%theme, "theme changed");
    Ok(Json(PanelPreferences::load(state.settings.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::disconnected_state;

    #[tokio::test]
    async fn theme_is_persisted_and_normalized() {
        let state = disconnected_state();
        let Json(prefs) = preferences(State(state.clone())).await;
        assert_eq!(prefs.theme, Theme::Auto);

        let Json(prefs) = set_theme(
            State(state.clone()),
            Json(ThemeRequest {
                theme: "dark".to_string(),
            }),
        )
        .await
        .expect("set theme");
        assert_eq!(prefs.theme, Theme::Dark);

        let Json(prefs) = set_theme(
            State(state),
            Json(ThemeRequest {
                theme: "neon".to_string(),
            }),
        )
        .await
        .expect("set theme");
        assert_eq!(prefs.theme, Theme::Auto);
    }
}
