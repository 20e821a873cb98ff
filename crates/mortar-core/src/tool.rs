//! The validated construction bundle and per-type construction hooks.
//!
//! Concrete tool types embed a [`ToolCore`] and implement [`Tool`]. The core
//! carries everything the factory validated and resolved (dependencies,
//! configuration, name, singleton flag, properties and the named logger),
//! so a tool's own `build` hook only has to add its domain state on top.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{ToolConfig, ToolName};
use crate::dependencies::Dependencies;
use crate::error::ToolError;
use crate::identity::{self, Identifier};
use crate::logging::{self, ToolLogger};

/// Everything a fresh tool instance is built from.
///
/// Assembled by the factory after validation, exactly once per fresh
/// construction. Constructions that hit the registry never assemble a core,
/// which is what keeps the logger side effect from repeating.
pub struct ToolCore {
    dependencies: Dependencies,
    configuration: Value,
    name: ToolName,
    singleton: bool,
    properties: Option<Map<String, Value>>,
    logger: Arc<dyn ToolLogger>,
}

impl ToolCore {
    /// Attach the named logger and bundle the validated fields.
    ///
    /// The sub-logger comes from the injected `logger` capability when there
    /// is one, from the process default provider otherwise. Either way it
    /// announces itself once, through the resolved logger.
    pub(crate) fn assemble(dependencies: Dependencies, config: ToolConfig) -> Self {
        let provider = dependencies
            .logger()
            .unwrap_or_else(logging::default_provider);
        let logger = provider.scoped(config.name().as_str());
        logger.info(&format!("Initialized logger for tool {}", config.name()));

        let (name, singleton, properties, configuration) = config.into_parts();
        Self {
            dependencies,
            configuration,
            name,
            singleton,
            properties,
            logger,
        }
    }

    /// The capabilities the container injected.
    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    /// The raw configuration this instance was constructed from.
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }

    /// The validated tool name.
    pub fn name(&self) -> &ToolName {
        &self.name
    }

    /// Whether this instance was requested with registry semantics.
    pub fn singleton(&self) -> bool {
        self.singleton
    }

    /// The free-form properties payload, if any.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }

    /// The logger handle scoped to this tool's name.
    pub fn logger(&self) -> &dyn ToolLogger {
        self.logger.as_ref()
    }
}

impl fmt::Debug for ToolCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolCore")
            .field("name", &self.name)
            .field("singleton", &self.singleton)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Per-type construction hooks, implemented by every concrete tool.
///
/// The two hooks replace what subclassing provided in older component
/// systems: `build` finishes a fresh instance around its assembled core,
/// `identity_of` decides which singleton key a properties payload maps to.
///
/// # Examples
///
/// ```rust
/// use mortar_core::{Tool, ToolCore, ToolError};
///
/// struct Heartbeat {
///     core: ToolCore,
///     interval_secs: u64,
/// }
///
/// impl Tool for Heartbeat {
///     fn build(core: ToolCore) -> Result<Self, ToolError> {
///         let interval_secs = core
///             .properties()
///             .and_then(|props| props.get("interval_secs"))
///             .and_then(|value| value.as_u64())
///             .unwrap_or(30);
///         Ok(Self {
///             core,
///             interval_secs,
///         })
///     }
///
///     fn core(&self) -> &ToolCore {
///         &self.core
///     }
/// }
/// ```
pub trait Tool: Sized + Send + Sync + 'static {
    /// Finish constructing a fresh instance around its assembled core.
    ///
    /// Runs after validation and logger attachment, and only for
    /// constructions that did not hit the registry. Errors are propagated
    /// to the caller unchanged.
    fn build(core: ToolCore) -> Result<Self, ToolError>;

    /// Borrow the core shared by every tool instance.
    fn core(&self) -> &ToolCore;

    /// Identity used to key singleton instances of this type.
    ///
    /// Defaults to the structural hash of `properties`. Override to pin a
    /// constant (one instance per process, whatever the properties) or to
    /// derive a natural key from selected fields.
    fn identity_of(properties: Option<&Map<String, Value>>) -> Identifier {
        identity::of_properties(properties)
    }

    /// The validated tool name.
    fn name(&self) -> &ToolName {
        self.core().name()
    }

    /// The logger handle scoped to this tool's name.
    fn logger(&self) -> &dyn ToolLogger {
        self.core().logger()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::Capability;
    use crate::logging::LoggerProvider;
    use serde_json::json;
    use std::sync::Mutex;

    struct Recorder {
        lines: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingLogger {
        name: String,
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl LoggerProvider for Recorder {
        fn scoped(&self, name: &str) -> Arc<dyn ToolLogger> {
            Arc::new(RecordingLogger {
                name: name.to_string(),
                lines: Arc::clone(&self.lines),
            })
        }
    }

    impl ToolLogger for RecordingLogger {
        fn info(&self, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("[{}] {}", self.name, message));
        }

        fn debug(&self, _message: &str) {}
        fn warn(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
    }

    fn config(value: &Value) -> ToolConfig {
        ToolConfig::from_value(value).unwrap()
    }

    #[test]
    fn assemble_stores_the_validated_fields() {
        let deps = Dependencies::new().with("limits", Capability::Value(json!({ "rps": 5 })));
        let raw = json!({
            "name": "fetcher",
            "singleton": true,
            "properties": { "url": "https://example.com" },
        });

        let core = ToolCore::assemble(deps, config(&raw));

        assert_eq!(core.name().as_str(), "fetcher");
        assert!(core.singleton());
        assert_eq!(core.configuration(), &raw);
        assert_eq!(
            core.properties().unwrap().get("url"),
            Some(&json!("https://example.com"))
        );
        assert!(core.dependencies().get("limits").is_some());
    }

    #[test]
    fn assemble_uses_the_injected_logger_and_announces_once() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let deps = Dependencies::new().with_logger(Arc::new(Recorder {
            lines: Arc::clone(&lines),
        }));

        let core = ToolCore::assemble(deps, config(&json!({ "name": "fetcher" })));
        core.logger().info("follow-up");

        let lines = lines.lock().unwrap();
        assert_eq!(
            lines.as_slice(),
            [
                "[fetcher] Initialized logger for tool fetcher",
                "[fetcher] follow-up",
            ]
        );
    }

    #[test]
    fn assemble_falls_back_to_the_default_provider() {
        // No logger capability; attachment must still succeed.
        let core = ToolCore::assemble(Dependencies::new(), config(&json!({ "name": "plain" })));
        assert_eq!(core.name().as_str(), "plain");
    }
}
