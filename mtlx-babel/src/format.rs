//! The Format trait
//!
//! A format turns document text into an element tree and back. File access goes through
//! [Format::read_file] and [Format::write_file], which default to plain text I/O around
//! [Format::parse] and [Format::serialize]; formats whose reading depends on the file's location
//! (XML includes resolve against the including file) override them.

use crate::error::FormatError;
use mtlx_core::Document;
use std::fs;
use std::path::Path;

pub trait Format: Send + Sync {
    /// Short name, e.g. "mtlx" or "json"
    fn name(&self) -> &str;

    /// File extensions handled by this format, without the dot
    fn file_extensions(&self) -> &[&str];

    fn parse(&self, source: &str) -> Result<Document, FormatError>;

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    fn read_file(&self, path: &Path) -> Result<Document, FormatError> {
        let source = fs::read_to_string(path).map_err(|err| FormatError::io(path, err))?;
        self.parse(&source)
    }

    fn write_file(&self, doc: &Document, path: &Path) -> Result<(), FormatError> {
        let text = self.serialize(doc)?;
        fs::write(path, text).map_err(|err| FormatError::io(path, err))
    }
}
