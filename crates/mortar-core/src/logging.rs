//! Logger collaborator contract and the tracing-backed default.
//!
//! Tools never log through a global sink directly. The container may inject
//! a [`LoggerProvider`] as the `logger` capability; when it does not, the
//! core falls back to a process-wide default that emits through `tracing`.

use std::sync::Arc;

use once_cell::sync::Lazy;

/// Target used by the default provider when emitting through `tracing`.
pub const LOG_TARGET: &str = "mortar_tool";

/// Derives named sub-loggers for tools.
///
/// Implemented by the injected `logger` capability. `scoped` is called once
/// per fresh construction with the tool's validated name; the handle it
/// returns stays attached to the instance for its whole lifetime.
pub trait LoggerProvider: Send + Sync {
    /// Derive a sub-logger bound to `name`.
    fn scoped(&self, name: &str) -> Arc<dyn ToolLogger>;
}

/// A logger handle bound to one tool name.
pub trait ToolLogger: Send + Sync {
    /// Emit an informational message.
    fn info(&self, message: &str);

    /// Emit a debug-level message.
    fn debug(&self, message: &str);

    /// Emit a warning.
    fn warn(&self, message: &str);

    /// Emit an error message.
    fn error(&self, message: &str);
}

/// Default provider emitting through `tracing`.
///
/// Every message carries the tool name as a structured field so subscribers
/// can filter per tool without parsing message text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoggerProvider;

impl LoggerProvider for TracingLoggerProvider {
    fn scoped(&self, name: &str) -> Arc<dyn ToolLogger> {
        Arc::new(TracingToolLogger {
            name: name.to_string(),
        })
    }
}

struct TracingToolLogger {
    name: String,
}

impl ToolLogger for TracingToolLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, tool = %self.name, "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, tool = %self.name, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: LOG_TARGET, tool = %self.name, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, tool = %self.name, "{}", message);
    }
}

static DEFAULT_PROVIDER: Lazy<Arc<dyn LoggerProvider>> =
    Lazy::new(|| Arc::new(TracingLoggerProvider));

/// The process-wide default provider, used when dependencies carry no logger.
pub fn default_provider() -> Arc<dyn LoggerProvider> {
    Arc::clone(&DEFAULT_PROVIDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_provider_returns_the_same_instance() {
        let first = default_provider();
        let second = default_provider();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn tracing_provider_scopes_without_panicking() {
        let logger = TracingLoggerProvider.scoped("sample");
        logger.info("info line");
        logger.debug("debug line");
        logger.warn("warn line");
        logger.error("error line");
    }
}
