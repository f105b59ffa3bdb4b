//! Parallel strategy: one blocking task per array, bounded by a semaphore.
//!
//! Each task copies its source array, sorts the copy, and hands it back.
//! How results are gathered depends on [`OutputOrder`]: tagged slots keep
//! input order, a mutex-guarded vector keeps completion order.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::debug;

use super::{Array, SortMode, SortStrategy, sorted_copy};

/// How the concurrent strategy orders its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputOrder {
    /// Each result lands in the slot of its source array.
    #[default]
    Input,
    /// Results are appended as tasks finish. Order is unspecified.
    Completion,
}

/// Fans a batch out over at most `max_workers` blocking threads.
pub struct ConcurrentSorter {
    permits: Arc<Semaphore>,
    max_workers: usize,
    order: OutputOrder,
}

impl ConcurrentSorter {
    /// A `max_workers` of zero is treated as one.
    pub fn new(max_workers: usize, order: OutputOrder) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
            order,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn order(&self) -> OutputOrder {
        self.order
    }

    /// Run `task` once per array. Exposed so callers can swap the per-array
    /// work; [`SortStrategy::sort_batch`] uses [`sorted_copy`].
    pub async fn run<F>(&self, batch: Arc<[Array]>, task: F) -> Result<Vec<Array>>
    where
        F: Fn(&[i64]) -> Array + Send + Sync + 'static,
    {
        debug!(
            tasks = batch.len(),
            workers = self.max_workers,
            order = ?self.order,
            "dispatching sort tasks"
        );
        let task = Arc::new(task);
        match self.order {
            OutputOrder::Input => self.collect_in_slots(batch, task).await,
            OutputOrder::Completion => self.collect_on_completion(batch, task).await,
        }
    }

    async fn collect_in_slots<F>(&self, batch: Arc<[Array]>, task: Arc<F>) -> Result<Vec<Array>>
    where
        F: Fn(&[i64]) -> Array + Send + Sync + 'static,
    {
        let mut handles = Vec::with_capacity(batch.len());
        for index in 0..batch.len() {
            let permit = Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .context("worker pool closed")?;
            let batch = Arc::clone(&batch);
            let task = Arc::clone(&task);
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                (index, task(&batch[index]))
            }));
        }

        let mut slots: Vec<Option<Array>> = vec![None; batch.len()];
        for (index, joined) in join_all(handles).await.into_iter().enumerate() {
            let (slot, sorted) = joined.with_context(|| format!("sort task {index} failed"))?;
            slots[slot] = Some(sorted);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.with_context(|| format!("sort task {index} left no result")))
            .collect()
    }

    async fn collect_on_completion<F>(
        &self,
        batch: Arc<[Array]>,
        task: Arc<F>,
    ) -> Result<Vec<Array>>
    where
        F: Fn(&[i64]) -> Array + Send + Sync + 'static,
    {
        let output = Arc::new(Mutex::new(Vec::with_capacity(batch.len())));
        let mut handles = Vec::with_capacity(batch.len());
        for index in 0..batch.len() {
            let permit = Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .context("worker pool closed")?;
            let batch = Arc::clone(&batch);
            let task = Arc::clone(&task);
            let output = Arc::clone(&output);
            handles.push(tokio::task::spawn_blocking(move || -> Result<()> {
                let _permit = permit;
                let sorted = task(&batch[index]);
                // Held for the push only.
                output
                    .lock()
                    .map_err(|_| anyhow!("output lock poisoned"))?
                    .push(sorted);
                Ok(())
            }));
        }

        for (index, joined) in join_all(handles).await.into_iter().enumerate() {
            joined
                .with_context(|| format!("sort task {index} failed"))?
                .with_context(|| format!("sort task {index} failed"))?;
        }

        Arc::try_unwrap(output)
            .map_err(|_| anyhow!("sort output still shared after join"))?
            .into_inner()
            .map_err(|_| anyhow!("output lock poisoned"))
    }
}

impl Default for ConcurrentSorter {
    fn default() -> Self {
        Self::new(crate::consts::default_max_workers(), OutputOrder::default())
    }
}

#[async_trait]
impl SortStrategy for ConcurrentSorter {
    fn mode(&self) -> SortMode {
        SortMode::Concurrent
    }

    async fn sort_batch(&self, batch: Arc<[Array]>) -> Result<Vec<Array>> {
        self.run(batch, sorted_copy).await
    }
}
