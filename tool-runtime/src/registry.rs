//! Indexed store of tool descriptors with deterministic conflict resolution.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock};

use tool_primitives::ToolDescriptor;
use tracing::{debug, info, warn};

/// Outcome of a [`ToolRegistry::register`] call.
///
/// Registration never fails: name conflicts are resolved deterministically by
/// priority and disabled descriptors are skipped. The outcome makes the
/// applied decision observable to callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Registration {
    /// The descriptor was inserted under a previously vacant name.
    Registered,
    /// The descriptor replaced a lower-priority incumbent of the same name.
    Replaced,
    /// An incumbent with greater or equal priority was kept; the new
    /// descriptor was discarded.
    KeptExisting,
    /// The descriptor was disabled and the call was a no-op.
    SkippedDisabled,
}

/// Name map and category index, guarded together so they can never be
/// observed in disagreement.
#[derive(Default)]
struct Indexes {
    by_name: HashMap<String, Arc<ToolDescriptor>>,
    by_category: HashMap<String, Vec<Arc<ToolDescriptor>>>,
}

impl Indexes {
    fn insert(&mut self, descriptor: Arc<ToolDescriptor>) {
        self.by_category
            .entry(descriptor.category().to_owned())
            .or_default()
            .push(Arc::clone(&descriptor));
        self.by_name
            .insert(descriptor.name().to_owned(), descriptor);
    }

    fn remove(&mut self, name: &str) -> Option<Arc<ToolDescriptor>> {
        let removed = self.by_name.remove(name)?;
        if let Some(entries) = self.by_category.get_mut(removed.category()) {
            entries.retain(|entry| entry.name() != removed.name());
            if entries.is_empty() {
                self.by_category.remove(removed.category());
            }
        }
        Some(removed)
    }
}

/// Registry that stores tool descriptors keyed by name, with a secondary
/// category index kept in insertion order.
///
/// At most one enabled descriptor occupies a given name at any time. All
/// mutations run inside a single write-locked critical section.
#[derive(Default)]
pub struct ToolRegistry {
    inner: RwLock<Indexes>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().expect("tool registry poisoned");
        let names: Vec<_> = inner.by_name.keys().cloned().collect();
        f.debug_struct("ToolRegistry")
            .field("registered", &names)
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor, resolving name conflicts by priority.
    ///
    /// A disabled descriptor is skipped. When the name is already occupied,
    /// a strictly greater priority replaces the incumbent (its index entries
    /// are reversed first); otherwise the incumbent is kept and the new
    /// registration discarded. Equal priority always favors the incumbent,
    /// which makes the policy idempotent.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn register(&self, descriptor: ToolDescriptor) -> Registration {
        if !descriptor.enabled() {
            debug!(tool = descriptor.name(), "skipping disabled tool");
            return Registration::SkippedDisabled;
        }

        let descriptor = Arc::new(descriptor);
        let mut inner = self.inner.write().expect("tool registry poisoned");

        let outcome = if let Some(existing) = inner.by_name.get(descriptor.name()) {
            warn!(
                tool = descriptor.name(),
                existing_priority = existing.priority(),
                new_priority = descriptor.priority(),
                "tool name conflict detected"
            );
            if descriptor.priority() > existing.priority() {
                info!(
                    tool = descriptor.name(),
                    "replacing tool with higher priority version"
                );
                inner.remove(descriptor.name());
                Registration::Replaced
            } else {
                info!(
                    tool = descriptor.name(),
                    "keeping existing tool with higher or equal priority"
                );
                return Registration::KeptExisting;
            }
        } else {
            Registration::Registered
        };

        info!(
            tool = descriptor.name(),
            category = descriptor.category(),
            description = descriptor.description(),
            "registered tool"
        );
        inner.insert(descriptor);
        outcome
    }

    /// Removes a descriptor by name, returning it if present.
    ///
    /// The category index entry is removed in the same critical section; an
    /// emptied category disappears from [`categories`](Self::categories).
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn unregister(&self, name: &str) -> Option<Arc<ToolDescriptor>> {
        let mut inner = self.inner.write().expect("tool registry poisoned");
        let removed = inner.remove(name);
        if removed.is_some() {
            info!(tool = name, "unregistered tool");
        }
        removed
    }

    /// Returns the descriptor registered under the supplied name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ToolDescriptor>> {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner.by_name.get(name).cloned()
    }

    /// Returns all registered descriptors.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<ToolDescriptor>> {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner.by_name.values().cloned().collect()
    }

    /// Returns the descriptors in the supplied category, in insertion order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<Arc<ToolDescriptor>> {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner.by_category.get(category).cloned().unwrap_or_default()
    }

    /// Returns the descriptors whose tag set contains the supplied tag.
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<Arc<ToolDescriptor>> {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner
            .by_name
            .values()
            .filter(|descriptor| descriptor.tags().contains(tag))
            .cloned()
            .collect()
    }

    /// Returns the descriptors whose name or description contains the
    /// supplied substring, case-insensitively.
    #[must_use]
    pub fn search(&self, pattern: &str) -> Vec<Arc<ToolDescriptor>> {
        let pattern = pattern.to_lowercase();
        let inner = self.inner.read().expect("tool registry poisoned");
        inner
            .by_name
            .values()
            .filter(|descriptor| {
                descriptor.name().to_lowercase().contains(&pattern)
                    || descriptor.description().to_lowercase().contains(&pattern)
            })
            .cloned()
            .collect()
    }

    /// Returns the set of all known categories.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<String> {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner.by_category.keys().cloned().collect()
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner.by_name.len()
    }

    /// Whether the registry holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a descriptor is registered under the supplied name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read().expect("tool registry poisoned");
        inner.by_name.contains_key(name)
    }

    /// Drops every descriptor and category entry.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn clear(&self) {
        let mut inner = self.inner.write().expect("tool registry poisoned");
        inner.by_name.clear();
        inner.by_category.clear();
        info!("cleared all tools from registry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;
    use tool_primitives::{FunctionTarget, Invocable};

    fn descriptor(name: &str, category: &str, priority: i32) -> ToolDescriptor {
        let target: Arc<dyn Invocable> =
            Arc::new(FunctionTarget::new(Vec::new(), |_| Ok(Value::Null)));
        ToolDescriptor::builder(name, target)
            .description(format!("{name} tool"))
            .category(category)
            .priority(priority)
            .tag(category.to_owned())
            .build()
            .expect("descriptor")
    }

    #[test]
    fn register_and_get() {
        let registry = ToolRegistry::new();
        let outcome = registry.register(descriptor("read_file", "file", 0));
        assert_eq!(outcome, Registration::Registered);

        let found = registry.get("read_file").expect("registered");
        assert_eq!(found.category(), "file");
        assert!(registry.contains("read_file"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn disabled_registration_is_noop() {
        let registry = ToolRegistry::new();
        let target: Arc<dyn Invocable> =
            Arc::new(FunctionTarget::new(Vec::new(), |_| Ok(Value::Null)));
        let disabled = ToolDescriptor::builder("off", target)
            .description("disabled tool")
            .enabled(false)
            .build()
            .expect("descriptor");

        assert_eq!(registry.register(disabled), Registration::SkippedDisabled);
        assert!(registry.is_empty());
    }

    #[test]
    fn higher_priority_replaces_incumbent() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("x", "general", 1));
        let outcome = registry.register(descriptor("x", "special", 2));

        assert_eq!(outcome, Registration::Replaced);
        let winner = registry.get("x").expect("present");
        assert_eq!(winner.priority(), 2);
        assert_eq!(winner.category(), "special");
        // the incumbent's category entry must be gone
        assert!(registry.by_category("general").is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn equal_priority_keeps_incumbent() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("list_tables", "database", 0));
        let outcome = registry.register(descriptor("list_tables", "other", 0));

        assert_eq!(outcome, Registration::KeptExisting);
        let kept = registry.get("list_tables").expect("present");
        assert_eq!(kept.category(), "database");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_cleans_category_index() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("get_weather", "weather", 0));
        registry.register(descriptor("query_sql", "database", 0));

        assert!(registry.categories().contains("weather"));
        let removed = registry.unregister("get_weather").expect("removed");
        assert_eq!(removed.name(), "get_weather");
        assert!(!registry.categories().contains("weather"));
        assert!(registry.categories().contains("database"));
        assert!(registry.unregister("get_weather").is_none());
    }

    #[test]
    fn category_preserves_insertion_order() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("a", "file", 0));
        registry.register(descriptor("b", "file", 0));
        registry.register(descriptor("c", "file", 0));

        let names: Vec<_> = registry
            .by_category("file")
            .iter()
            .map(|d| d.name().to_owned())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn tag_and_search_queries() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("query_sql", "database", 0));
        registry.register(descriptor("read_file", "file", 0));

        let tagged = registry.by_tag("database");
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].name(), "query_sql");

        let hits = registry.search("SQL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "query_sql");

        assert!(registry.search("missing").is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("a", "file", 0));
        registry.register(descriptor("b", "database", 0));

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.categories().is_empty());
    }
}
