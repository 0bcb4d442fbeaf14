//! Capture providers — where raw image bytes come from.
//!
//! The queue never talks to the OS directly. It asks a [`CaptureProvider`]
//! for bytes and writes them verbatim.

#[cfg(feature = "screen-capture")]
mod screenshot;

#[cfg(feature = "screen-capture")]
pub use screenshot::MonitorProvider;

use crate::error::CaptureError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source of raw image bytes (PNG in the reference deployment).
///
/// An empty `Vec` is treated as "no data" by the queue.
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    async fn capture(&self) -> Result<Vec<u8>, CaptureError>;
}

/// A provider that replays scripted results in order.
///
/// Once the script runs out, every call returns the fallback. Useful for
/// hosts without a display and for tests.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    fallback: Result<Vec<u8>, String>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Always returns `bytes`.
    pub fn repeating(bytes: Vec<u8>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(bytes),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue one result ahead of the fallback.
    pub fn then(self, result: Result<Vec<u8>, String>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(result);
        }
        self
    }

    /// Number of times `capture` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureProvider for ScriptedProvider {
    async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|e| CaptureError::Provider(e.to_string()))?
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        next.map_err(CaptureError::Provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_runs_before_fallback() {
        let provider = ScriptedProvider::repeating(vec![1, 2, 3])
            .then(Err("display asleep".into()))
            .then(Ok(vec![9]));

        assert!(matches!(
            provider.capture().await,
            Err(CaptureError::Provider(msg)) if msg == "display asleep"
        ));
        assert_eq!(provider.capture().await.unwrap(), vec![9]);
        assert_eq!(provider.capture().await.unwrap(), vec![1, 2, 3]);
        assert_eq!(provider.capture().await.unwrap(), vec![1, 2, 3]);
        assert_eq!(provider.calls(), 4);
    }

    #[tokio::test]
    async fn failing_provider_always_fails() {
        let provider = ScriptedProvider::failing("no monitor");
        assert!(provider.capture().await.is_err());
        assert!(provider.capture().await.is_err());
        assert_eq!(provider.calls(), 2);
    }
}
