use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for ignitool operations.
///
/// Every failure is terminal for the current invocation; the CLI layer
/// formats the error and sets the exit status. There is no retry logic.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed directive syntax in a template.
    #[error("template '{name}': {source}")]
    TemplateSyntax {
        name: String,
        source: minijinja::Error,
    },

    /// A template referenced a variable missing from the mapping.
    ///
    /// Lookup is strict: undefined references fail instead of rendering as
    /// an empty string.
    #[error("template '{name}': {source}")]
    UndefinedVariable {
        name: String,
        source: minijinja::Error,
    },

    /// A rendered or on-disk document is not valid JSON of the expected shape.
    #[error("malformed document '{path}': {source}")]
    MalformedDocument {
        path: String,
        source: serde_json::Error,
    },

    /// A backing asset for a file entry or systemd dropin is missing.
    #[error("asset not found: {}", path.display())]
    AssetNotFound { path: PathBuf },

    /// An embedded payload could not be decoded back to text.
    #[error("invalid embedded content: {0}")]
    InvalidEmbeddedContent(String),

    /// A required environment variable is not set.
    #[error("missing environment variable '{0}'")]
    MissingEnvVar(String),
}
