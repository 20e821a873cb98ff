//! Tool construction errors.
//!
//! Validation failures are the only errors that originate in this crate.
//! Everything else, such as a concrete type's `build` hook failing, is
//! passed through unchanged so a broken collaborator stays visible to the
//! caller instead of being masked here.

/// Argument validation failures raised by a construction call.
///
/// Each variant corresponds to exactly one of the checks run against the
/// `(dependencies, configuration)` pair before anything else happens. The
/// messages name the offending field and the shape it was expected to have.
///
/// These errors are never retried internally; the caller must correct the
/// input and invoke the factory again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    /// The container handed over no dependencies.
    #[error("missing/incorrect 'dependencies' object argument")]
    Dependencies,

    /// The configuration was absent or not a JSON object.
    #[error("missing/incorrect 'configuration' object argument")]
    Configuration,

    /// The configuration carried no usable `name` string.
    #[error("missing/incorrect 'name' string property in configuration")]
    Name,

    /// A `singleton` flag was present but not a boolean.
    #[error("incorrect 'singleton' boolean property in configuration")]
    Singleton,

    /// A `properties` payload was present but not a JSON object.
    #[error("incorrect 'properties' object property in configuration")]
    Properties,
}

/// Errors surfaced by [`ToolFactory::acquire`](crate::factory::ToolFactory::acquire).
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// One of the five argument validations failed.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// A concrete type's `build` hook failed. The underlying error is
    /// propagated unchanged, not translated.
    #[error(transparent)]
    Build(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ToolError {
    /// Wrap a concrete type's build failure for propagation.
    pub fn build<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ToolError::Build(Box::new(error))
    }
}

/// Result type alias for construction calls.
pub type ToolResult<T> = Result<T, ToolError>;
