//! Injected capabilities.
//!
//! The container resolves a tool's dependencies from its wiring and hands
//! them over as a [`Dependencies`] map. The core interprets exactly one
//! capability itself, the optional `logger`, and carries the rest opaquely
//! for the concrete tool type to pick up during `build`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::logging::LoggerProvider;

/// Name of the capability slot the core interprets itself.
pub const LOGGER_CAPABILITY: &str = "logger";

/// A single injected capability instance.
#[derive(Clone)]
pub enum Capability {
    /// A logger provider; the core derives the tool's named sub-logger from it.
    Logger(Arc<dyn LoggerProvider>),
    /// Plain data the container resolved for the tool.
    Value(Value),
    /// Any other live capability; opaque to the core.
    Handle(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Logger(_) => f.write_str("Logger(..)"),
            Capability::Value(value) => write!(f, "Value({value})"),
            Capability::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

/// Capabilities injected by the container, keyed by capability name.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use mortar_core::{Capability, Dependencies, TracingLoggerProvider};
///
/// let deps = Dependencies::new()
///     .with_logger(Arc::new(TracingLoggerProvider))
///     .with("limits", Capability::Value(serde_json::json!({ "rps": 50 })));
///
/// assert!(deps.logger().is_some());
/// assert_eq!(deps.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    capabilities: HashMap<String, Capability>,
}

impl Dependencies {
    /// Create an empty capability map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, capability: Capability) {
        self.capabilities.insert(name.into(), capability);
    }

    /// Add a capability using the builder pattern.
    pub fn with(mut self, name: impl Into<String>, capability: Capability) -> Self {
        self.insert(name, capability);
        self
    }

    /// Add a logger provider under the [`LOGGER_CAPABILITY`] slot.
    pub fn with_logger(self, provider: Arc<dyn LoggerProvider>) -> Self {
        self.with(LOGGER_CAPABILITY, Capability::Logger(provider))
    }

    /// Look up a capability by name.
    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(name)
    }

    /// The injected logger provider, if the `logger` slot holds one.
    pub fn logger(&self) -> Option<Arc<dyn LoggerProvider>> {
        match self.capabilities.get(LOGGER_CAPABILITY) {
            Some(Capability::Logger(provider)) => Some(Arc::clone(provider)),
            _ => None,
        }
    }

    /// Names of all injected capabilities.
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.keys().map(String::as_str).collect()
    }

    /// Number of injected capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Whether the container injected nothing.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
