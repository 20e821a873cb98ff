//! Validated tool configuration.
//!
//! The container hands every tool the raw, already-parsed JSON section of
//! its manifest. [`ToolConfig::from_value`] is the single place that turns
//! that untrusted value into validated fields; nothing downstream ever
//! re-checks shapes.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::InvalidArgument;

/// Validated tool name.
///
/// Names identify the tool kind/instance in log output. The only rule is
/// non-emptiness; the name is never used as a lookup key.
///
/// # Examples
///
/// ```rust
/// use mortar_core::ToolName;
///
/// let name = ToolName::parse("healthcheck").unwrap();
/// assert_eq!(name.as_str(), "healthcheck");
///
/// assert!(ToolName::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolName(String);

impl ToolName {
    /// Parse and validate a tool name from a string.
    pub fn parse(name: impl AsRef<str>) -> Result<Self, InvalidArgument> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(InvalidArgument::Name);
        }
        Ok(Self(name.to_string()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create a tool name without validation.
    ///
    /// Only for inputs already known to be valid, such as literals in tests.
    #[doc(hidden)]
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ToolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A tool's validated construction configuration.
///
/// Produced by [`ToolConfig::from_value`] and consumed by the factory. The
/// raw value is retained alongside the validated fields because concrete
/// tool types read their own settings out of it during `build`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    name: ToolName,
    singleton: bool,
    properties: Option<Map<String, Value>>,
    raw: Value,
}

impl ToolConfig {
    /// Validate a raw configuration value.
    ///
    /// Checks, in order: the value is a JSON object, `name` is a non-empty
    /// string, `singleton` (if present) is a boolean, and `properties` (if
    /// present) is an object. A `properties` of `null` counts as absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mortar_core::ToolConfig;
    /// use serde_json::json;
    ///
    /// let config = ToolConfig::from_value(&json!({
    ///     "name": "fetcher",
    ///     "singleton": true,
    ///     "properties": { "url": "https://example.com" },
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.name().as_str(), "fetcher");
    /// assert!(config.singleton());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, InvalidArgument> {
        let object = value.as_object().ok_or(InvalidArgument::Configuration)?;

        let name = match object.get("name") {
            Some(Value::String(name)) => ToolName::parse(name)?,
            _ => return Err(InvalidArgument::Name),
        };

        let singleton = match object.get("singleton") {
            None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(InvalidArgument::Singleton),
        };

        let properties = match object.get("properties") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(_) => return Err(InvalidArgument::Properties),
        };

        Ok(Self {
            name,
            singleton,
            properties,
            raw: value.clone(),
        })
    }

    /// The validated tool name.
    pub fn name(&self) -> &ToolName {
        &self.name
    }

    /// Whether registry semantics apply to this construction.
    pub fn singleton(&self) -> bool {
        self.singleton
    }

    /// The free-form properties payload, if any.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }

    /// The raw configuration value this config was validated from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub(crate) fn into_parts(self) -> (ToolName, bool, Option<Map<String, Value>>, Value) {
        (self.name, self.singleton, self.properties, self.raw)
    }
}
