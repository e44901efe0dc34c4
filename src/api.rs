use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

use crate::config::{AppConfig, CorsConfig, CorsMode};
use crate::error::{RelayError, Result};
use crate::models::{BotLogicRequest, PineScriptResponse};
use crate::services::PineScriptGenerator;

pub struct AppState {
    pub generator: Arc<dyn PineScriptGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn PineScriptGenerator>) -> Arc<Self> {
        Arc::new(Self { generator })
    }
}

/// Cross-origin layer for the configured mode. `None` when disabled.
///
/// Browsers refuse `*` together with credentials, so "any" is realized by
/// mirroring the request's origin, method and headers.
pub fn cors_layer(cors: &CorsConfig) -> Result<Option<CorsLayer>> {
    let origin = match cors.mode {
        CorsMode::Disabled => return Ok(None),
        CorsMode::Permissive => AllowOrigin::mirror_request(),
        CorsMode::Restricted => {
            let origins = cors
                .allowed_origins
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).map_err(|_| {
                        RelayError::Configuration(format!("invalid CORS origin '{}'", o))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            AllowOrigin::list(origins)
        }
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    ))
}

pub fn build_router(state: Arc<AppState>, cors: &CorsConfig) -> Result<Router> {
    let router = Router::new()
        .route("/generate-pine-script", post(generate_pine_script))
        .route("/health", get(health))
        .with_state(state);

    Ok(match cors_layer(cors)? {
        Some(layer) => router.layer(layer),
        None => router,
    })
}

pub async fn run_server(
    state: Arc<AppState>,
    config: &AppConfig,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = build_router(state, &config.cors)?;

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 [API] Server listening on {} (CORS: {:?})", addr, config.cors.mode);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn generate_pine_script(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<BotLogicRequest>, JsonRejection>,
) -> Result<Json<PineScriptResponse>> {
    let Json(request) = payload.map_err(|rejection| RelayError::InvalidRequest {
        status: rejection.status().as_u16(),
        detail: rejection.body_text(),
    })?;

    let response = state.generator.generate_pine_script(&request.logic).await?;
    Ok(Json(response))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
