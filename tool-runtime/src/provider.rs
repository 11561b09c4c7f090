//! Callback provider: a lazily built cache of invocation wrappers.
//!
//! The provider holds one [`ToolCallback`] per enabled descriptor in the
//! registry. The cache is built on first access and only changes through
//! [`refresh`](CallbackProvider::refresh) or the incremental
//! [`add_callback`](CallbackProvider::add_callback) /
//! [`remove_callback`](CallbackProvider::remove_callback) calls — it does not
//! watch the registry automatically.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use tool_primitives::ToolDescriptor;
use tracing::{debug, info};

use crate::callback::ToolCallback;
use crate::registry::ToolRegistry;

/// Caches one invocation wrapper per registered tool, keyed by tool name.
///
/// Lookups clone the wrapper `Arc` out of the lock, so tool execution never
/// happens while a cache or registry lock is held: a slow tool cannot stall
/// registration or unrelated lookups.
pub struct CallbackProvider {
    registry: Arc<ToolRegistry>,
    cache: RwLock<HashMap<String, Arc<ToolCallback>>>,
}

impl fmt::Debug for CallbackProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.read().expect("callback cache poisoned");
        let names: Vec<_> = cache.keys().cloned().collect();
        f.debug_struct("CallbackProvider")
            .field("cached", &names)
            .finish_non_exhaustive()
    }
}

impl CallbackProvider {
    /// Creates a provider over the supplied registry.
    ///
    /// The cache starts empty; it is built on first access.
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the registry this provider reads from.
    #[must_use]
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Returns all cached wrappers, building the cache lazily first.
    #[must_use]
    pub fn callbacks(&self) -> Vec<Arc<ToolCallback>> {
        self.ensure_built();
        let cache = self.cache.read().expect("callback cache poisoned");
        cache.values().cloned().collect()
    }

    /// Looks up the wrapper for the supplied tool name, building the cache
    /// lazily first. Tool name is the sole canonical identity.
    #[must_use]
    pub fn callback(&self, name: &str) -> Option<Arc<ToolCallback>> {
        self.ensure_built();
        let cache = self.cache.read().expect("callback cache poisoned");
        cache.get(name).cloned()
    }

    /// Clears and eagerly rebuilds the entire cache from the registry's
    /// current state. Call after bulk registry mutation.
    ///
    /// # Panics
    ///
    /// Panics if the internal cache lock is poisoned.
    pub fn refresh(&self) {
        let mut cache = self.cache.write().expect("callback cache poisoned");
        cache.clear();
        Self::build_into(&self.registry, &mut cache);
        info!(callbacks = cache.len(), "tool callbacks refreshed");
    }

    /// Adds a single wrapper for the supplied descriptor without a full
    /// rebuild. Disabled descriptors never get a wrapper.
    ///
    /// Returns whether a wrapper was added.
    pub fn add_callback(&self, descriptor: Arc<ToolDescriptor>) -> bool {
        if !descriptor.enabled() {
            debug!(tool = descriptor.name(), "not caching disabled tool");
            return false;
        }

        let mut cache = self.cache.write().expect("callback cache poisoned");
        let name = descriptor.name().to_owned();
        cache.insert(name.clone(), Arc::new(ToolCallback::new(descriptor)));
        debug!(tool = name, "cached tool callback");
        true
    }

    /// Removes the wrapper for the supplied tool name, if cached.
    ///
    /// Returns whether a wrapper was removed.
    pub fn remove_callback(&self, name: &str) -> bool {
        let mut cache = self.cache.write().expect("callback cache poisoned");
        let removed = cache.remove(name).is_some();
        if removed {
            debug!(tool = name, "dropped tool callback");
        }
        removed
    }

    /// Returns the number of cached wrappers, building the cache lazily first.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.ensure_built();
        let cache = self.cache.read().expect("callback cache poisoned");
        cache.len()
    }

    /// Whether a wrapper exists for the supplied tool name, building the
    /// cache lazily first.
    #[must_use]
    pub fn has_callback(&self, name: &str) -> bool {
        self.callback(name).is_some()
    }

    /// Check-lock-check lazy construction: concurrent first accesses build
    /// the cache exactly once.
    fn ensure_built(&self) {
        {
            let cache = self.cache.read().expect("callback cache poisoned");
            if !cache.is_empty() {
                return;
            }
        }

        let mut cache = self.cache.write().expect("callback cache poisoned");
        if cache.is_empty() && !self.registry.is_empty() {
            Self::build_into(&self.registry, &mut cache);
            info!(callbacks = cache.len(), "tool callback cache built");
        }
    }

    fn build_into(registry: &ToolRegistry, cache: &mut HashMap<String, Arc<ToolCallback>>) {
        for descriptor in registry.all() {
            if descriptor.enabled() {
                cache.insert(
                    descriptor.name().to_owned(),
                    Arc::new(ToolCallback::new(descriptor)),
                );
            }
        }
    }
}
