use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{error::ApiError, state::ApiState};

#[derive(Serialize)]
struct InstanceConfiguration {
    api_port: u16,
    window_size: usize,

    upstream_url: String,
    upstream_timeout_ms: u64,
    upstream_authenticated: bool,
    endpoints: Map<String, Value>,
}

pub(super) async fn handle_status(
    State(state): State<Arc<ApiState>>,
) -> Result<impl IntoResponse, ApiError> {
    let windows: Map<String, Value> = state
        .windows
        .sizes()?
        .into_iter()
        .map(|(category, size)| (category.id().to_string(), json!(size)))
        .collect();

    let upstream = &state.config.upstream;
    let configuration = InstanceConfiguration {
        api_port: state.config.api_port,
        window_size: state.windows.capacity().get(),
        upstream_url: upstream.base_url.clone(),
        upstream_timeout_ms: u64::try_from(upstream.timeout.as_millis()).unwrap_or(u64::MAX),
        upstream_authenticated: upstream.bearer_token.is_some(),
        endpoints: upstream
            .endpoints
            .iter()
            .map(|(category, endpoint)| (category.id().to_string(), json!(endpoint)))
            .collect(),
    };

    Ok(axum::Json(json!({
        "configuration": configuration,
        "windows": windows,
    })))
}
