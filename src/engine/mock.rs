use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Array, SortMode, SortStrategy};

/// A scripted strategy for tests. Returns a fixed answer or a fixed failure
/// and counts how often it was invoked.
pub struct MockSorter {
    mode: SortMode,
    outcome: std::result::Result<Vec<Array>, String>,
    calls: AtomicUsize,
}

impl MockSorter {
    pub fn returning(mode: SortMode, sorted: Vec<Array>) -> Self {
        Self {
            mode,
            outcome: Ok(sorted),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mode: SortMode, reason: &str) -> Self {
        Self {
            mode,
            outcome: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SortStrategy for MockSorter {
    fn mode(&self) -> SortMode {
        self.mode
    }

    async fn sort_batch(&self, _batch: Arc<[Array]>) -> Result<Vec<Array>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(sorted) => Ok(sorted.clone()),
            Err(reason) => bail!("{}", reason),
        }
    }
}
