//! MaterialX XML reading and writing
//!
//!     The XML form maps one-to-one onto the element tree: the tag is the category, the `name`
//!     attribute is the name and every other attribute is kept in declaration order. The root
//!     tag is always `<materialx>` and carries the document attributes.
//!
//!     `<xi:include href="..."/>` at document level pulls in another file. Its elements are
//!     imported with their source URI set, and the writer turns them back into include lines
//!     instead of inlining them.

pub mod reader;
pub mod writer;

use crate::document::TreeError;
use std::path::PathBuf;
use thiserror::Error;

pub use reader::{read_from_file, read_from_str, XmlReadOptions};
pub use writer::{write_to_file, write_to_string, XmlWriteOptions};

pub const XINCLUDE_TAG: &str = "xi:include";
pub const XINCLUDE_NAMESPACE: &str = "http://www.w3.org/2001/XInclude";
pub const NAME_ATTRIBUTE: &str = "name";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    Parse(String),
    #[error("expected a <materialx> root element, found <{0}>")]
    UnexpectedRoot(String),
    #[error("document has no <materialx> root element")]
    MissingRoot,
    #[error("<{category}> element is missing a name attribute")]
    MissingName { category: String },
    #[error("included file '{href}' was not found")]
    MissingInclude { href: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl XmlError {
    pub(crate) fn parse(err: impl std::fmt::Display) -> Self {
        XmlError::Parse(err.to_string())
    }
}
