//! Capture queue — two bounded, disk-backed partitions of screenshots.
//!
//! Each partition keeps at most `capacity` artifacts. New captures go to the
//! active partition; when it overflows, the oldest artifact is dropped from
//! the queue and its file removed (best-effort).

mod partition;
mod visibility;

pub use partition::{Partition, PartitionQueue, UnknownPartition};
pub use visibility::VisibilityGuard;

use crate::capture::CaptureProvider;
use crate::config::QueueConfig;
use crate::error::{CaptureError, ConfigError, DeleteOutcome, PreviewError};
use crate::{preview, storage};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

pub struct CaptureQueueManager<P> {
    config: QueueConfig,
    provider: P,
    active: Partition,
    primary: PartitionQueue,
    secondary: PartitionQueue,
}

impl<P: CaptureProvider> CaptureQueueManager<P> {
    /// Both partition directories in `config` must already exist.
    ///
    /// Fails if `config` doesn't pass [`QueueConfig::validate`].
    pub fn new(config: QueueConfig, provider: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.capacity;
        Ok(Self {
            config,
            provider,
            active: Partition::Primary,
            primary: PartitionQueue::new(capacity),
            secondary: PartitionQueue::new(capacity),
        })
    }

    pub fn with_active(mut self, partition: Partition) -> Self {
        self.active = partition;
        self
    }

    pub fn active_partition(&self) -> Partition {
        self.active
    }

    pub fn set_active_partition(&mut self, partition: Partition) {
        log::debug!("[QUEUE] Active partition: {} -> {}", self.active, partition);
        self.active = partition;
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn directory(&self, partition: Partition) -> &Path {
        self.config.directory(partition)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of a partition's paths, oldest first.
    pub fn list_partition(&self, partition: Partition) -> Vec<PathBuf> {
        self.queue(partition).paths()
    }

    /// Empty both partitions and dispatch deletion of their files.
    ///
    /// The queues are empty when this returns. File removal runs in the
    /// background on the current tokio runtime (inline when there is none);
    /// await [`PendingDeletions::settled`] to observe it, or drop it.
    pub fn clear_all(&mut self) -> PendingDeletions {
        let mut pending = PendingDeletions::default();
        let runtime = tokio::runtime::Handle::try_current().ok();

        for partition in [Partition::Primary, Partition::Secondary] {
            let paths = self.queue_mut(partition).drain();
            log::info!(
                "[QUEUE] Clearing {} partition ({} artifacts)",
                partition,
                paths.len()
            );
            for path in paths {
                match &runtime {
                    Some(handle) => pending.handles.push(handle.spawn(async move {
                        storage::remove_best_effort(&path, "screenshot").await
                    })),
                    None => {
                        if storage::remove_best_effort_blocking(&path, "screenshot") {
                            pending.removed_inline += 1;
                        }
                    }
                }
            }
        }

        pending
    }

    /// Hide, settle, capture into the active partition, then show again.
    ///
    /// `show` runs on every exit path. On overflow the oldest artifact is
    /// evicted; capture never fails just because the partition is full.
    pub async fn capture_and_enqueue<H, S>(&mut self, hide: H, show: S) -> Result<PathBuf, CaptureError>
    where
        H: FnOnce(),
        S: FnOnce(),
    {
        log::info!("[QUEUE] Capture requested. Active partition: {}", self.active);
        let _visibility = VisibilityGuard::hide(hide, show);

        let result = self.capture_into_active().await;
        if let Err(e) = &result {
            log::error!("[QUEUE] Error taking screenshot: {}", e);
        }
        result
    }

    async fn capture_into_active(&mut self) -> Result<PathBuf, CaptureError> {
        let start = std::time::Instant::now();

        if !self.config.settle_delay.is_zero() {
            log::debug!("[QUEUE] Settling for {:?}", self.config.settle_delay);
            tokio::time::sleep(self.config.settle_delay).await;
        }

        let partition = self.active;
        let path = storage::new_artifact_path(self.config.directory(partition));

        let bytes = self.provider.capture().await?;
        if bytes.is_empty() {
            return Err(CaptureError::NoData);
        }

        if let Err(source) = tokio::fs::write(&path, &bytes).await {
            // Don't leave a truncated file behind
            if let Err(e) = tokio::fs::remove_file(&path).await {
                log::debug!(
                    "[QUEUE] No partial file to remove at {}: {}",
                    path.display(),
                    e
                );
            }
            return Err(CaptureError::Write { path, source });
        }

        log::info!(
            "[QUEUE] Wrote {} bytes to {} in {}ms",
            bytes.len(),
            path.display(),
            start.elapsed().as_millis()
        );

        let queue = self.queue_mut(partition);
        let evicted = queue.push_bounded(path.clone());
        log::info!(
            "[QUEUE] Added to {} partition. Length: {}",
            partition,
            queue.len()
        );

        if let Some(oldest) = evicted {
            log::info!("[QUEUE] Evicting oldest screenshot: {}", oldest.display());
            storage::remove_best_effort(&oldest, "evicted screenshot").await;
        }

        Ok(path)
    }

    /// Read any file and return it as a PNG data URI.
    ///
    /// The path doesn't need to be tracked by either partition.
    pub async fn preview(&self, path: impl AsRef<Path>) -> Result<String, PreviewError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            log::error!("[QUEUE] Error reading image {}: {}", path.display(), e);
            PreviewError::from_io(path.to_path_buf(), e)
        })?;
        Ok(preview::encode_data_uri(&bytes))
    }

    /// Delete the file at `path`, then drop it from the *active* partition.
    ///
    /// If the path is tracked by the inactive partition, that partition's
    /// list is left alone. On failure nothing in memory changes.
    pub async fn delete_artifact(&mut self, path: impl AsRef<Path>) -> DeleteOutcome {
        let path = path.as_ref();
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                let active = self.active;
                let removed = self.queue_mut(active).remove(path);
                log::info!(
                    "[QUEUE] Deleted {} ({} entries dropped from {} partition)",
                    path.display(),
                    removed,
                    active
                );
                DeleteOutcome::ok()
            }
            Err(e) => {
                log::error!("[QUEUE] Error deleting file {}: {}", path.display(), e);
                DeleteOutcome::failed(e.to_string())
            }
        }
    }

    fn queue(&self, partition: Partition) -> &PartitionQueue {
        match partition {
            Partition::Primary => &self.primary,
            Partition::Secondary => &self.secondary,
        }
    }

    fn queue_mut(&mut self, partition: Partition) -> &mut PartitionQueue {
        match partition {
            Partition::Primary => &mut self.primary,
            Partition::Secondary => &mut self.secondary,
        }
    }
}

/// File deletions dispatched by [`CaptureQueueManager::clear_all`].
///
/// Dropping this detaches the deletions; they still run.
#[derive(Debug, Default)]
pub struct PendingDeletions {
    handles: Vec<JoinHandle<bool>>,
    removed_inline: usize,
}

impl PendingDeletions {
    /// Number of deletions that have not been awaited.
    pub fn in_flight(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every deletion. Returns how many files were removed.
    pub async fn settled(self) -> usize {
        let mut removed = self.removed_inline;
        for handle in self.handles {
            match handle.await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => log::error!("[QUEUE] Deletion task failed: {}", e),
            }
        }
        removed
    }
}
