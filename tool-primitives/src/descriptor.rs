//! Tool descriptor metadata.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::target::Invocable;

const DEFAULT_CATEGORY: &str = "general";
const DEFAULT_VERSION: &str = "1.0";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Immutable metadata record describing a registered tool.
///
/// Descriptors are built by a discovery collaborator, validated once at
/// construction, and never mutated afterwards. The registry and callback
/// provider share them via `Arc`.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    category: String,
    version: String,
    tags: BTreeSet<String>,
    enabled: bool,
    priority: i32,
    requires_auth: bool,
    timeout_ms: u64,
    cacheable: bool,
    cache_ttl_seconds: u64,
    target: Arc<dyn Invocable>,
}

impl ToolDescriptor {
    /// Starts building a descriptor for the supplied name and target.
    #[must_use]
    pub fn builder(name: impl Into<String>, target: Arc<dyn Invocable>) -> ToolDescriptorBuilder {
        ToolDescriptorBuilder {
            name: name.into(),
            description: None,
            category: DEFAULT_CATEGORY.to_owned(),
            version: DEFAULT_VERSION.to_owned(),
            tags: BTreeSet::new(),
            enabled: true,
            priority: 0,
            requires_auth: false,
            timeout_ms: 0,
            cacheable: false,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            target,
        }
    }

    /// Unique tool name; the sole canonical identity within the registry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description shown to models and clients.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Organizational category, `"general"` by default.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Tool version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Tags attached for filtering; immutable for the descriptor's lifetime.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Whether the tool participates in registration at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Conflict-resolution priority; higher wins, ties favor the incumbent.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Advisory flag: the tool expects an authenticated caller.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Advisory execution deadline in milliseconds; zero means none.
    ///
    /// Not enforced by this core; a layer above may apply it.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Advisory hint that responses may be cached externally.
    #[must_use]
    pub const fn cacheable(&self) -> bool {
        self.cacheable
    }

    /// Advisory cache TTL in seconds, meaningful when `cacheable` is set.
    #[must_use]
    pub const fn cache_ttl_seconds(&self) -> u64 {
        self.cache_ttl_seconds
    }

    /// Returns the invocable target backing this tool.
    #[must_use]
    pub fn target(&self) -> &Arc<dyn Invocable> {
        &self.target
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("version", &self.version)
            .field("tags", &self.tags)
            .field("enabled", &self.enabled)
            .field("priority", &self.priority)
            .field("requires_auth", &self.requires_auth)
            .field("timeout_ms", &self.timeout_ms)
            .field("cacheable", &self.cacheable)
            .field("parameters", &self.target.parameters().len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ToolDescriptor`].
pub struct ToolDescriptorBuilder {
    name: String,
    description: Option<String>,
    category: String,
    version: String,
    tags: BTreeSet<String>,
    enabled: bool,
    priority: i32,
    requires_auth: bool,
    timeout_ms: u64,
    cacheable: bool,
    cache_ttl_seconds: u64,
    target: Arc<dyn Invocable>,
}

impl ToolDescriptorBuilder {
    /// Sets the required human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the organizational category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the tool version string.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a filter tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Replaces the tag set wholesale.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables the tool.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the conflict-resolution priority.
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the tool as requiring an authenticated caller.
    #[must_use]
    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Sets the advisory execution deadline in milliseconds.
    #[must_use]
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Marks responses as externally cacheable with the supplied TTL.
    #[must_use]
    pub fn cacheable(mut self, ttl_seconds: u64) -> Self {
        self.cacheable = true;
        self.cache_ttl_seconds = ttl_seconds;
        self
    }

    /// Finalises the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] if the name or description is
    /// empty or blank. Registration does not re-validate; this is the single
    /// enforcement point for the descriptor contract.
    pub fn build(self) -> Result<ToolDescriptor> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_descriptor("tool name cannot be empty"));
        }

        let description = self
            .description
            .ok_or_else(|| Error::invalid_descriptor("tool description must be provided"))?;
        if description.trim().is_empty() {
            return Err(Error::invalid_descriptor(
                "tool description cannot be empty",
            ));
        }

        Ok(ToolDescriptor {
            name: self.name,
            description,
            category: self.category,
            version: self.version,
            tags: self.tags,
            enabled: self.enabled,
            priority: self.priority,
            requires_auth: self.requires_auth,
            timeout_ms: self.timeout_ms,
            cacheable: self.cacheable,
            cache_ttl_seconds: self.cache_ttl_seconds,
            target: self.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::target::FunctionTarget;
    use serde_json::Value;

    fn noop_target() -> Arc<dyn Invocable> {
        Arc::new(FunctionTarget::new(Vec::new(), |_| Ok(Value::Null)))
    }

    #[test]
    fn builder_applies_defaults() {
        let descriptor = ToolDescriptor::builder("echo", noop_target())
            .description("Echoes input")
            .build()
            .expect("build");

        assert_eq!(descriptor.name(), "echo");
        assert_eq!(descriptor.category(), "general");
        assert_eq!(descriptor.version(), "1.0");
        assert!(descriptor.tags().is_empty());
        assert!(descriptor.enabled());
        assert_eq!(descriptor.priority(), 0);
        assert!(!descriptor.requires_auth());
        assert_eq!(descriptor.timeout_ms(), 0);
        assert!(!descriptor.cacheable());
        assert_eq!(descriptor.cache_ttl_seconds(), 300);
    }

    #[test]
    fn builder_rejects_missing_description() {
        let err = ToolDescriptor::builder("echo", noop_target())
            .build()
            .expect_err("description is required");
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn builder_rejects_blank_fields() {
        let err = ToolDescriptor::builder("  ", noop_target())
            .description("valid")
            .build()
            .expect_err("blank name");
        assert!(matches!(err, Error::InvalidDescriptor { .. }));

        let err = ToolDescriptor::builder("echo", noop_target())
            .description("   ")
            .build()
            .expect_err("blank description");
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn builder_collects_tags_and_flags() {
        let descriptor = ToolDescriptor::builder("query_sql", noop_target())
            .description("Runs a query")
            .category("database")
            .version("2.0")
            .tags(["sql", "query"])
            .tag("database")
            .priority(5)
            .requires_auth(true)
            .timeout_ms(30_000)
            .cacheable(600)
            .build()
            .expect("build");

        assert_eq!(descriptor.category(), "database");
        assert_eq!(descriptor.version(), "2.0");
        assert_eq!(descriptor.tags().len(), 3);
        assert!(descriptor.tags().contains("database"));
        assert_eq!(descriptor.priority(), 5);
        assert!(descriptor.requires_auth());
        assert_eq!(descriptor.timeout_ms(), 30_000);
        assert!(descriptor.cacheable());
        assert_eq!(descriptor.cache_ttl_seconds(), 600);
    }
}
