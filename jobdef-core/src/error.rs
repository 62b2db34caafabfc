//! Error types for job definition rendering

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Reason used when a document has no usable `containerProperties`
pub const MISSING_CONTAINER_PROPERTIES: &str = "Could not find container properties";

/// Errors that can abort a render
///
/// Every variant is fatal; the message is what gets reported to the caller.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The lookup service returned no candidate definitions
    #[error("No job definitions found")]
    NotFound,

    /// Local job definition file is missing
    #[error("Job definition file does not exist: {0}")]
    FileNotFound(String),

    /// Local job definition file is not valid JSON
    #[error("Job definition file {} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document is not a usable job definition
    #[error("Invalid job definition: {0}")]
    InvalidJobDefinition(String),

    /// Lookup call failed; message is passed through untouched
    #[error("{0}")]
    Transport(String),

    /// Neither a name nor a file was supplied
    #[error("Either job-definition-name or job-definition must be provided")]
    MissingSource,

    /// Filesystem failure while reading input or writing output
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendering the document back to JSON failed
    #[error("Failed to serialize job definition")]
    Serialize(#[source] serde_json::Error),
}

impl RenderError {
    /// Error for a document without container properties
    pub fn missing_container_properties() -> Self {
        Self::InvalidJobDefinition(MISSING_CONTAINER_PROPERTIES.to_string())
    }

    /// Wrap an I/O error with a short description of what was attempted
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
