//! Error type shared by every format and the conversion helpers

use mtlx_core::xml::XmlError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The JSON payload lacks the mimetype marker, or carries another one
    #[error("JSON document is not a MaterialX document")]
    NotAMaterialDocument,
    /// The JSON payload has no `materialx` body
    #[error("JSON document is missing a MaterialX root element")]
    MissingDocumentRoot,
    /// The text is not valid JSON
    #[error("malformed JSON: {0}")]
    MalformedText(#[from] serde_json::Error),
    #[error(transparent)]
    Xml(#[from] XmlError),
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FormatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FormatError::Io {
            path: path.into(),
            source,
        }
    }
}
