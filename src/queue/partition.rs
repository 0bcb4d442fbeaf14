//! Partitions and their bounded FIFO queues.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One of the two capture contexts.
///
/// `queue`/`solutions` are accepted as aliases for older callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    #[default]
    #[serde(alias = "queue")]
    Primary,
    #[serde(alias = "solutions")]
    Secondary,
}

impl Partition {
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Primary => "primary",
            Partition::Secondary => "secondary",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Partition::Primary => Partition::Secondary,
            Partition::Secondary => Partition::Primary,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown partition: {0:?}")]
pub struct UnknownPartition(pub String);

impl FromStr for Partition {
    type Err = UnknownPartition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" | "queue" => Ok(Partition::Primary),
            "secondary" | "solutions" => Ok(Partition::Secondary),
            other => Err(UnknownPartition(other.to_string())),
        }
    }
}

/// Artifact paths in insertion order, oldest at the front.
///
/// Holds at most `capacity` entries after every `push_bounded`.
#[derive(Debug, Clone)]
pub struct PartitionQueue {
    items: VecDeque<PathBuf>,
    capacity: usize,
}

impl PartitionQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.items.iter().any(|p| p == path)
    }

    /// Owned copy of the current paths, oldest first.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.items.iter().cloned().collect()
    }

    /// Append `path`, then pop the oldest entry if over capacity.
    ///
    /// Returns the evicted path, if any.
    pub fn push_bounded(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.items.push_back(path);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    /// Remove every entry equal to `path`. Returns how many were removed.
    pub fn remove(&mut self, path: &Path) -> usize {
        let before = self.items.len();
        self.items.retain(|p| p != path);
        before - self.items.len()
    }

    /// Take all entries, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<PathBuf> {
        self.items.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/shots/{}.png", name))
    }

    #[test]
    fn push_within_capacity_keeps_everything() {
        let mut q = PartitionQueue::new(3);
        assert_eq!(q.push_bounded(p("a")), None);
        assert_eq!(q.push_bounded(p("b")), None);
        assert_eq!(q.paths(), vec![p("a"), p("b")]);
    }

    #[test]
    fn overflow_evicts_oldest_and_keeps_newest_last() {
        let mut q = PartitionQueue::new(2);
        q.push_bounded(p("a"));
        q.push_bounded(p("b"));
        assert_eq!(q.push_bounded(p("c")), Some(p("a")));
        assert_eq!(q.push_bounded(p("d")), Some(p("b")));
        assert_eq!(q.paths(), vec![p("c"), p("d")]);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut q = PartitionQueue::new(5);
        for i in 0..40 {
            q.push_bounded(p(&i.to_string()));
            assert!(q.len() <= q.capacity());
        }
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut q = PartitionQueue::new(5);
        for name in ["a", "b", "c", "d"] {
            q.push_bounded(p(name));
        }
        assert_eq!(q.remove(&p("b")), 1);
        assert_eq!(q.paths(), vec![p("a"), p("c"), p("d")]);
        assert_eq!(q.remove(&p("zzz")), 0);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut q = PartitionQueue::new(5);
        q.push_bounded(p("a"));
        let mut snapshot = q.paths();
        snapshot.clear();
        assert!(q.contains(&p("a")));
    }

    #[test]
    fn drain_empties_queue() {
        let mut q = PartitionQueue::new(5);
        q.push_bounded(p("a"));
        q.push_bounded(p("b"));
        assert_eq!(q.drain(), vec![p("a"), p("b")]);
        assert!(q.is_empty());
    }

    #[test]
    fn partition_names_and_aliases_parse() {
        assert_eq!("primary".parse::<Partition>().unwrap(), Partition::Primary);
        assert_eq!("queue".parse::<Partition>().unwrap(), Partition::Primary);
        assert_eq!("solutions".parse::<Partition>().unwrap(), Partition::Secondary);
        assert!("tertiary".parse::<Partition>().is_err());
        assert_eq!(Partition::Primary.other(), Partition::Secondary);
        assert_eq!(Partition::default(), Partition::Primary);
    }

    #[test]
    fn serde_accepts_legacy_view_names() {
        let solutions: Partition = serde_json::from_str("\"solutions\"").unwrap();
        assert_eq!(solutions, Partition::Secondary);
        let queue: Partition = serde_json::from_str("\"queue\"").unwrap();
        assert_eq!(queue, Partition::Primary);
        assert_eq!(serde_json::to_string(&Partition::Secondary).unwrap(), "\"secondary\"");
        assert!(serde_json::from_str::<Partition>("\"tertiary\"").is_err());
    }
}
