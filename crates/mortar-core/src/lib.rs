//! # Mortar Core
//!
//! Tool construction primitives for the Mortar component framework.
//! A *tool* wraps some capability, receives its dependencies from the
//! container, and may opt into singleton semantics: constructions whose
//! `properties` payloads are structurally equal resolve to the same
//! registered instance instead of building a new one.
//!
//! The crate provides the factory and registry mechanics only; what a tool
//! actually does, and how the container wires its dependencies, live
//! elsewhere.

pub mod config;
pub mod dependencies;
pub mod error;
pub mod factory;
pub mod identity;
pub mod logging;
pub mod tool;

pub use config::{ToolConfig, ToolName};
pub use dependencies::{Capability, Dependencies, LOGGER_CAPABILITY};
pub use error::{InvalidArgument, ToolError, ToolResult};
pub use factory::ToolFactory;
pub use identity::{Identifier, structural_hash};
pub use logging::{LoggerProvider, ToolLogger, TracingLoggerProvider, default_provider};
pub use tool::{Tool, ToolCore};
