//! Per-type construction entry point and singleton registry.
//!
//! A [`ToolFactory`] is the only way to obtain tool instances. The container
//! keeps one factory per concrete tool type for the lifetime of the process,
//! which makes the factory's registry the type-scoped singleton registry:
//! explicit, owned state instead of ambient global storage keyed by type
//! name, and trivially isolated in tests by creating a fresh factory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::config::ToolConfig;
use crate::dependencies::Dependencies;
use crate::error::{InvalidArgument, ToolError};
use crate::identity::Identifier;
use crate::tool::{Tool, ToolCore};

/// Construction entry point for one concrete tool type.
///
/// # Examples
///
/// ```rust
/// use mortar_core::{Dependencies, Tool, ToolCore, ToolError, ToolFactory};
/// use serde_json::json;
///
/// struct Cache {
///     core: ToolCore,
/// }
///
/// impl Tool for Cache {
///     fn build(core: ToolCore) -> Result<Self, ToolError> {
///         Ok(Self { core })
///     }
///
///     fn core(&self) -> &ToolCore {
///         &self.core
///     }
/// }
///
/// let factory = ToolFactory::<Cache>::new();
/// let config = json!({ "name": "cache", "singleton": true, "properties": { "slots": 64 } });
///
/// let first = factory
///     .acquire(Some(Dependencies::new()), &config)
///     .unwrap();
/// let second = factory
///     .acquire(Some(Dependencies::new()), &config)
///     .unwrap();
///
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub struct ToolFactory<T: Tool> {
    registry: Mutex<HashMap<Identifier, Arc<T>>>,
}

impl<T: Tool> Default for ToolFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tool> ToolFactory<T> {
    /// Create a factory with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Validate the arguments, then build a fresh instance or return the
    /// registered one.
    ///
    /// Non-singleton configurations never touch the registry: every call
    /// yields a fresh instance. Singleton configurations resolve their
    /// identifier through [`Tool::identity_of`] and then perform
    /// lookup-or-build-and-insert under a single lock acquisition, so at
    /// most one instance per identifier can ever exist. A registry hit
    /// returns the existing instance as-is: no logger side effect, no
    /// `build` hook, and the dependencies passed to the hitting call are
    /// dropped unread.
    ///
    /// Validation failures surface before any registry mutation; a failing
    /// `build` hook on a registry miss leaves the registry unchanged.
    pub fn acquire(
        &self,
        dependencies: Option<Dependencies>,
        configuration: &Value,
    ) -> Result<Arc<T>, ToolError> {
        let dependencies = dependencies.ok_or(InvalidArgument::Dependencies)?;
        let config = ToolConfig::from_value(configuration)?;

        if !config.singleton() {
            let instance = T::build(ToolCore::assemble(dependencies, config))?;
            return Ok(Arc::new(instance));
        }

        let identifier = T::identity_of(config.properties());

        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = registry.get(&identifier) {
            return Ok(Arc::clone(existing));
        }

        let instance = Arc::new(T::build(ToolCore::assemble(dependencies, config))?);
        registry.insert(identifier, Arc::clone(&instance));
        Ok(instance)
    }

    /// Whether an instance is registered under `identifier`.
    pub fn is_registered(&self, identifier: &Identifier) -> bool {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(identifier)
    }

    /// Number of registered singleton instances.
    pub fn registered_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
