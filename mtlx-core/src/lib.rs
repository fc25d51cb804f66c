//! Element tree and XML I/O for MaterialX documents
//!
//!     A MaterialX document is a tree of elements. Every element has a category (its kind, which
//!     is also its XML tag), a name that is unique among its siblings, an ordered list of string
//!     attributes and an ordered list of children. This crate owns that tree and nothing more:
//!     node definitions, types and graph evaluation are out of scope.
//!
//! Ownership
//!
//!     The [Document](document::Document) owns all of its elements in an arena. Elements are
//!     addressed by [ElementId](document::ElementId) handles and read through the borrowed
//!     [Element](document::Element) view. Mutation goes through `&mut Document`, so a writer has
//!     exclusive access for as long as it holds the borrow.
//!
//! Provenance
//!
//!     Elements pulled in from another file (through `xi:include` or [library] loading) carry a
//!     non-empty source URI. Writers use it to keep library content out of the serialized
//!     document.
//!
//!     The file structure :
//!     .
//!     ├── document.rs         # Arena, element handles and views
//!     ├── version.rs          # Version stamping / upgrade hook
//!     ├── library.rs          # Library folders and file discovery
//!     ├── xml
//!     │   ├── reader.rs       # quick-xml event reader
//!     │   └── writer.rs       # Indented XML writer
//!     └── lib.rs

pub mod document;
pub mod library;
pub mod version;
pub mod xml;

pub use document::{Document, Element, ElementId, TreeError};
pub use version::LATEST_VERSION;
