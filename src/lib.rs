//! snapqueue — a bounded, disk-backed screenshot queue.
//!
//! This crate wires together:
//! - Capture providers (capture/)
//! - The two-partition capture queue (queue/)
//! - Configuration, storage provisioning, and preview encoding

pub mod capture;
pub mod config;
pub mod error;
pub mod preview;
pub mod queue;
pub mod storage;

pub use capture::{CaptureProvider, ScriptedProvider};
pub use config::QueueConfig;
pub use error::{CaptureError, ConfigError, DeleteOutcome, PreviewError};
pub use queue::{CaptureQueueManager, Partition, PendingDeletions};

/// Install the `env_logger` backend. Safe to call more than once.
///
/// Honors `RUST_LOG`; defaults to `info` when unset.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
