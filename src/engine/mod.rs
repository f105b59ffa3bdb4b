pub mod concurrent;
pub mod mock;
pub mod sequential;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// One array of integers as submitted by a caller.
pub type Array = Vec<i64>;

/// Which strategy a request was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Sequential,
    Concurrent,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Sequential => f.write_str("sequential"),
            SortMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// Turns a batch of arrays into a batch of sorted copies.
///
/// The batch is shared read-only; implementations sort private copies and
/// never touch the caller's arrays.
#[async_trait]
pub trait SortStrategy: Send + Sync {
    fn mode(&self) -> SortMode;
    async fn sort_batch(&self, batch: Arc<[Array]>) -> Result<Vec<Array>>;
}

/// Copy one array and sort the copy ascending.
pub fn sorted_copy(source: &[i64]) -> Array {
    let mut copy = source.to_vec();
    copy.sort_unstable();
    copy
}
