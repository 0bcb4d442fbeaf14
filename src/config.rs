//! Queue configuration: capacity, settle delay, and partition directories.
//!
//! Values can be overridden from the environment (or a `.env` file):
//! - `SNAPQUEUE_CAPACITY` — max artifacts kept per partition
//! - `SNAPQUEUE_SETTLE_MS` — delay between hide() and capture
//! - `SNAPQUEUE_ROOT` — storage root holding both partition directories

use crate::error::ConfigError;
use crate::queue::Partition;
use crate::storage;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

const PRIMARY_DIR_NAME: &str = "screenshots";
const SECONDARY_DIR_NAME: &str = "extra_screenshots";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub capacity: usize,
    pub settle_delay: Duration,
    pub primary_dir: PathBuf,
    pub secondary_dir: PathBuf,
}

impl QueueConfig {
    pub fn new(primary_dir: impl Into<PathBuf>, secondary_dir: impl Into<PathBuf>) -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            settle_delay: DEFAULT_SETTLE_DELAY,
            primary_dir: primary_dir.into(),
            secondary_dir: secondary_dir.into(),
        }
    }

    /// Both partition directories under a single root.
    pub fn under_root(root: &Path) -> Self {
        Self::new(root.join(PRIMARY_DIR_NAME), root.join(SECONDARY_DIR_NAME))
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Build from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let root = match lookup("SNAPQUEUE_ROOT") {
            Some(root) => PathBuf::from(root),
            None => storage::default_storage_root().ok_or(ConfigError::NoStorageRoot)?,
        };

        let mut config = Self::under_root(&root);

        if let Some(raw) = lookup("SNAPQUEUE_CAPACITY") {
            config.capacity = parse_number("SNAPQUEUE_CAPACITY", &raw)?;
        }
        if let Some(raw) = lookup("SNAPQUEUE_SETTLE_MS") {
            config.settle_delay = Duration::from_millis(parse_number("SNAPQUEUE_SETTLE_MS", &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.capacity));
        }
        if self.primary_dir == self.secondary_dir {
            return Err(ConfigError::SharedDirectory(self.primary_dir.clone()));
        }
        Ok(())
    }

    pub fn directory(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Primary => &self.primary_dir,
            Partition::Secondary => &self.secondary_dir,
        }
    }

    /// Create both partition directories if they don't exist.
    pub fn provision(&self) -> Result<(), ConfigError> {
        storage::ensure_dir(&self.primary_dir)?;
        storage::ensure_dir(&self.secondary_dir)?;
        log::info!(
            "[STORAGE] Partition dirs ready: {} | {}",
            self.primary_dir.display(),
            self.secondary_dir.display()
        );
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}
