use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::{Array, SortMode, SortStrategy, sorted_copy};

/// Sorts one array at a time, preserving input order.
pub fn sort_sequentially(batch: &[Array]) -> Vec<Array> {
    batch.iter().map(|array| sorted_copy(array)).collect()
}

/// Single-threaded strategy. The whole batch runs on one blocking thread so
/// the async executor stays free for other requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialSorter;

#[async_trait]
impl SortStrategy for SequentialSorter {
    fn mode(&self) -> SortMode {
        SortMode::Sequential
    }

    async fn sort_batch(&self, batch: Arc<[Array]>) -> Result<Vec<Array>> {
        tokio::task::spawn_blocking(move || sort_sequentially(&batch))
            .await
            .context("sequential sort worker failed")
    }
}
