//! Format selection by file name
//!
//! Conversions pick the reading and the writing format from the input and output paths. The
//! registry holds configured format instances, so the options a format was built with apply to
//! every file it handles.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{JsonFormat, MtlxFormat};
use std::path::Path;

/// Formats in registration order. A later registration replaces an earlier one of the same
/// name, keeping its position.
pub struct FormatRegistry {
    formats: Vec<Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: Vec::new(),
        }
    }

    /// `mtlx` and `json` with default options
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MtlxFormat::default());
        registry.register(JsonFormat::default());
        registry
    }

    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let format: Box<dyn Format> = Box::new(format);
        match self
            .formats
            .iter_mut()
            .find(|existing| existing.name() == format.name())
        {
            Some(existing) => *existing = format,
            None => self.formats.push(format),
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .iter()
            .find(|format| format.name() == name)
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// First format claiming `extension` (case-insensitive, without the dot)
    pub fn for_extension(&self, extension: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .iter()
            .find(|format| {
                format
                    .file_extensions()
                    .iter()
                    .any(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(format!(".{extension}")))
    }

    pub fn for_path(&self, path: &Path) -> Result<&dyn Format, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| FormatError::FormatNotFound(path.display().to_string()))?;
        self.for_extension(extension)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
