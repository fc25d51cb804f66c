//! MaterialX XML format
//!
//! Thin adapter over the reader and writer in `mtlx_core::xml`, so the XML form can be selected
//! through the registry like any other format.

use crate::error::FormatError;
use crate::format::Format;
use mtlx_core::xml::{self, XmlReadOptions, XmlWriteOptions};
use mtlx_core::Document;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct MtlxFormat {
    pub read_options: XmlReadOptions,
    pub write_options: XmlWriteOptions,
}

impl MtlxFormat {
    pub fn new(read_options: XmlReadOptions, write_options: XmlWriteOptions) -> Self {
        MtlxFormat {
            read_options,
            write_options,
        }
    }
}

impl Format for MtlxFormat {
    fn name(&self) -> &str {
        "mtlx"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mtlx"]
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let mut doc = Document::new();
        xml::read_from_str(&mut doc, source, &self.read_options)?;
        Ok(doc)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(xml::write_to_string(doc, &self.write_options))
    }

    /// Includes resolve against the file's folder and the document records the file as its
    /// source URI.
    fn read_file(&self, path: &Path) -> Result<Document, FormatError> {
        let mut doc = Document::new();
        xml::read_from_file(&mut doc, path, &self.read_options)?;
        Ok(doc)
    }
}
