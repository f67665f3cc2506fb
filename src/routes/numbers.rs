use std::sync::Arc;

use averager_core::{Average, Category, WindowReport};
use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, state::ApiState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumbersResponse {
    pub window_prev_state: Vec<i64>,
    pub window_curr_state: Vec<i64>,
    pub numbers: Vec<i64>,
    pub avg: Average,
}

impl IntoResponse for NumbersResponse {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

pub(super) async fn handle_numbers(
    State(api): State<Arc<ApiState>>,
    category: Result<Path<String>, PathRejection>,
) -> Result<NumbersResponse, ApiError> {
    let Path(category) = category?;
    let category: Category = category.parse()?;

    let numbers = api.source.fetch(category).await.into_numbers();
    let WindowReport { prev, curr, avg } = api.windows.ingest(category, &numbers)?;

    info!(%category, fetched = numbers.len(), size = curr.len(), %avg, "Updated average");
    Ok(NumbersResponse {
        window_prev_state: prev,
        window_curr_state: curr,
        numbers,
        avg,
    })
}
