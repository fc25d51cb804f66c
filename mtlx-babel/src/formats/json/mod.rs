//! MaterialX JSON format
//!
//! Strategy: direct mapping of the element tree onto nested JSON objects
//!
//! # Data Model
//!
//! | Element tree          | JSON                                         |
//! |-----------------------|----------------------------------------------|
//! | Document              | `{"mimetype": ..., "materialx": {...}}`      |
//! | Document attribute    | string field of the `materialx` object       |
//! | Element               | object under `"<category>:<name>"`           |
//! | Element attribute     | string field                                 |
//! | Library element       | not written                                  |
//!
//! # Example
//!
//! ```json
//! {
//!   "mimetype": "application/mtlx+json",
//!   "materialx": {
//!     "version": "1.39",
//!     "surfacematerial:M1": {
//!       "type": "material",
//!       "input:base": {
//!         "value": "1.0"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! # Round Trips
//!
//! Attribute and child order are preserved, so decoding an encoded document gives back an
//! equivalent tree, and re-encoding that tree (with the version upgrade disabled) gives back
//! the same text. Elements loaded from libraries are the exception: they are never written.

pub mod decoder;
pub mod encoder;
pub mod keys;
pub mod options;
pub mod writer;

use crate::error::FormatError;
use crate::format::Format;
use mtlx_core::Document;

pub use decoder::{decode_document, decode_document_from_text, decode_into};
pub use encoder::{encode_document, encode_document_to_text, encode_element};
pub use keys::{decode_child_key, encode_child_key, CATEGORY_NAME_SEPARATOR};
pub use options::{
    JsonReadOptions, JsonWriteOptions, Separators, SkipCallback, SkipReason, SkippedEntry,
};

/// Key of the mimetype marker in the wrapper object.
pub const MIMETYPE_KEY: &str = "mimetype";
/// Value of the mimetype marker.
pub const MIMETYPE: &str = "application/mtlx+json";
/// Key of the document body in the wrapper object.
pub const DOCUMENT_ROOT: &str = "materialx";

/// JSON format for bidirectional conversion
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    pub write_options: JsonWriteOptions,
    pub read_options: JsonReadOptions,
}

impl JsonFormat {
    pub fn new(write_options: JsonWriteOptions, read_options: JsonReadOptions) -> Self {
        JsonFormat {
            write_options,
            read_options,
        }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let mut doc = Document::new();
        decode_document_from_text(source, &mut doc, &self.read_options)?;
        Ok(doc)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        encode_document_to_text(doc, &self.write_options)
    }
}
