//! Channel status registry
//!
//! Maps voice channel ids to their `ChannelStatus`, creating a default
//! entry the first time a channel is looked up.

use std::sync::Arc;

use dashmap::DashMap;

use crate::core::ChannelId;

use super::status::{ChannelStatus, StatusSnapshot};

/// Concurrent registry of voice channel lock state
///
/// Owned once by the hosting service and shared by `Arc` with every
/// command handler. Entries are never evicted.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: DashMap<ChannelId, Arc<ChannelStatus>>,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Get the status for a channel, creating a default one if needed
    ///
    /// The check-and-insert runs under the shard lock, so concurrent first
    /// lookups of the same id all receive the same `Arc`.
    pub fn get(&self, id: ChannelId) -> Arc<ChannelStatus> {
        if let Some(status) = self.peek(id) {
            return status;
        }

        let status = self.channels.entry(id).or_insert_with(|| {
            tracing::debug!(channel = %id, "Creating default channel status");
            Arc::new(ChannelStatus::new())
        });
        Arc::clone(status.value())
    }

    /// Get the status for a channel without creating it
    pub fn peek(&self, id: ChannelId) -> Option<Arc<ChannelStatus>> {
        self.channels
            .get(&id)
            .map(|status| Arc::clone(status.value()))
    }

    /// Check if a channel has been seen
    pub fn contains(&self, id: ChannelId) -> bool {
        self.channels.contains_key(&id)
    }

    /// Get the number of known channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no channel has been seen yet
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Snapshot every known channel, sorted by id
    pub fn snapshot(&self) -> Vec<(ChannelId, StatusSnapshot)> {
        let mut entries: Vec<_> = self
            .channels
            .iter()
            .map(|entry| (*entry.key(), entry.value().snapshot()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserId;
    use std::thread;

    #[test]
    fn test_get_creates_default() {
        let registry = ChannelRegistry::new();
        assert!(registry.is_empty());

        let status = registry.get(ChannelId(1));
        assert!(!status.is_locked());
        assert_eq!(status.admin(), None);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ChannelId(1)));
    }

    #[test]
    fn test_mutations_persist() {
        let registry = ChannelRegistry::new();

        let status = registry.get(ChannelId(1));
        status.set_admin(UserId(7));
        status.lock();
        drop(status);

        let again = registry.get(ChannelId(1));
        assert!(again.is_locked());
        assert_eq!(again.admin(), Some(UserId(7)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_repeated_reads_are_equal() {
        let registry = ChannelRegistry::new();
        registry.get(ChannelId(5)).set_admin(UserId(3));

        let first = registry.get(ChannelId(5)).snapshot();
        let second = registry.get(ChannelId(5)).snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_peek_does_not_create() {
        let registry = ChannelRegistry::new();
        assert!(registry.peek(ChannelId(1)).is_none());
        assert!(registry.is_empty());

        registry.get(ChannelId(1));
        assert!(registry.peek(ChannelId(1)).is_some());
    }

    #[test]
    fn test_snapshot_sorted() {
        let registry = ChannelRegistry::new();
        registry.get(ChannelId(30));
        registry.get(ChannelId(10)).lock();
        registry.get(ChannelId(20));

        let snapshot = registry.snapshot();
        let ids: Vec<_> = snapshot.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert!(snapshot[0].1.locked);
    }

    #[test]
    fn test_concurrent_first_access_single_entry() {
        let registry = Arc::new(ChannelRegistry::new());
        let id = ChannelId(42);

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || registry.get(id))
            })
            .collect();

        let statuses: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        let canonical = registry.get(id);
        for status in &statuses {
            assert!(Arc::ptr_eq(status, &canonical));
        }

        // A write through any handle is visible through all of them
        statuses[17].set_admin(UserId(99));
        statuses[3].lock();
        assert!(canonical.is_locked());
        assert_eq!(statuses[0].admin(), Some(UserId(99)));
    }
}
