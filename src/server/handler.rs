use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

use super::AppState;
use super::error::ApiError;
use crate::engine::{Array, SortStrategy};

/// Request body for both routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    pub to_sort: Vec<Array>,
}

/// Response body for both routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortResponse {
    pub sorted_arrays: Vec<Array>,
    /// Time spent inside the strategy, in microseconds.
    pub time_us: u64,
}

/// Decode a batch from a raw body. Content-Type is not checked.
pub fn decode_request(body: &[u8]) -> Result<SortRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "rejected sort payload");
        ApiError::BadRequest(format!("Invalid JSON payload: {}", e))
    })
}

/// Decode, time the strategy, package the result.
pub async fn process(strategy: &dyn SortStrategy, body: &[u8]) -> Result<SortResponse, ApiError> {
    let request = decode_request(body)?;
    let arrays = request.to_sort.len();
    let batch: Arc<[Array]> = request.to_sort.into();

    let start = Instant::now();
    let sorted_arrays = strategy.sort_batch(batch).await.map_err(|e| {
        let reason = format!("{:#}", e);
        error!(mode = %strategy.mode(), error = %reason, "sort failed");
        ApiError::Internal(format!("sorting failed: {}", reason))
    })?;
    let time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

    debug!(mode = %strategy.mode(), arrays, time_us, "batch sorted");
    Ok(SortResponse {
        sorted_arrays,
        time_us,
    })
}

pub async fn process_single(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SortResponse>, ApiError> {
    process(state.sequential.as_ref(), &body).await.map(Json)
}

pub async fn process_concurrent(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SortResponse>, ApiError> {
    process(state.concurrent.as_ref(), &body).await.map(Json)
}
