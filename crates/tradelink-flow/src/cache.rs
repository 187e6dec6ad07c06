//! # Offline Cache
//!
//! A small string-keyed snapshot store. Workflows write JSON snapshots
//! after a successful fetch and read them back when the backend is
//! unreachable. The trait keeps the storage medium a host decision
//! (in-memory here, localStorage-equivalent or disk in a shell).
//!
//! Snapshots are best-effort: a missing or unparsable entry is treated
//! as a cache miss, never an error.

use std::collections::HashMap;
use std::sync::Mutex;

// =============================================================================
// Cache Keys
// =============================================================================

/// Well-known snapshot keys. One producer per key.
pub mod keys {
    /// Last successfully fetched order list (order dashboard).
    pub const ORDER_SNAPSHOT: &str = "pending_orders";
    /// Last successfully fetched wholesaler directory.
    pub const WHOLESALER_SNAPSHOT: &str = "supplier_clients_data";
}

// =============================================================================
// Cache Trait
// =============================================================================

pub trait OfflineCache: Send + Sync {
    /// Stores a snapshot, replacing any previous value under `key`.
    fn put(&self, key: &str, value: String);

    /// Returns the stored snapshot, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Drops the snapshot under `key`.
    fn remove(&self, key: &str);
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// Process-lifetime cache backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OfflineCache for MemoryCache {
    fn put(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_remove_roundtrip() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get(keys::ORDER_SNAPSHOT), None);

        cache.put(keys::ORDER_SNAPSHOT, "[]".to_string());
        assert_eq!(cache.get(keys::ORDER_SNAPSHOT), Some("[]".to_string()));

        cache.put(keys::ORDER_SNAPSHOT, "[1]".to_string());
        assert_eq!(cache.get(keys::ORDER_SNAPSHOT), Some("[1]".to_string()));

        cache.remove(keys::ORDER_SNAPSHOT);
        assert_eq!(cache.get(keys::ORDER_SNAPSHOT), None);
    }
}
