//! Shared registry snapshot
//!
//! Readers take an `Arc` to the current registry and keep using it without
//! holding any lock. A reload builds a whole new registry and swaps the
//! pointer; snapshots handed out earlier stay valid and unchanged.

use crate::registry::ProfileRegistry;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct SharedRegistry {
    current: RwLock<Arc<ProfileRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ProfileRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Current registry
    pub fn snapshot(&self) -> Arc<ProfileRegistry> {
        self.current.read().clone()
    }

    /// Replace the registry, returning the one it supersedes
    pub fn publish(&self, registry: ProfileRegistry) -> Arc<ProfileRegistry> {
        let next = Arc::new(registry);
        let count = next.len();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("Published profile registry with {} profile(s)", count);
        previous
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(ProfileRegistry::empty())
    }
}
