//! Multi-format interoperability for MaterialX documents
//!
//!     This crate converts MaterialX element trees to and from their text representations. The
//!     tree itself lives in `mtlx-core`; here we only map it onto each format.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all formats (parse, serialize, file read / write)
//!     - FormatRegistry: configured format instances, selected by name or file extension
//!     - Format implementations: `mtlx` (XML) and `json`
//!     - convert: file conversions through the registry, used by the command line tool
//!
//!     This is a pure lib: nothing here assumes a shell, so no printing, no env vars and no exit
//!     codes. Diagnostics go through `tracing`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry, lookup by extension
//!     ├── convert.rs              # File conversions and output naming
//!     ├── formats
//!     │   ├── json
//!     │   │   ├── keys.rs         # "<category>:<name>" child keys
//!     │   │   ├── options.rs      # Read / write options
//!     │   │   ├── encoder.rs      # Element tree → JSON
//!     │   │   ├── decoder.rs      # JSON → element tree
//!     │   │   ├── writer.rs       # Indentation / separator aware text output
//!     │   │   └── mod.rs
//!     │   └── mtlx
//!     │       └── mod.rs          # XML through mtlx-core
//!     └── lib.rs
//!
//! The JSON Format
//!
//!     A document becomes an object with a `mimetype` marker and a `materialx` body. Attributes
//!     are string fields, children are nested objects keyed by `<category>:<name>`. Order is
//!     preserved in both directions (serde_json is built with `preserve_order`), so a document
//!     without library content survives a round trip unchanged. Library content (elements with a
//!     source URI) is left out of the JSON form.
//!
//! Testing
//!     tests
//!     ├── json
//!     │   ├── main.rs             # harness, shared fixture helpers
//!     │   ├── encode.rs
//!     │   ├── decode.rs
//!     │   └── roundtrip.rs        # proptest round trips
//!     └── fixtures
//!         └── <docname>.mtlx / .json
//!
//! Cargo only discovers `tests/*.rs` and `tests/*/main.rs`, so main.rs pulls the others in as
//! modules.

pub mod convert;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::json::{JsonFormat, JsonReadOptions, JsonWriteOptions};
pub use formats::mtlx::MtlxFormat;
pub use registry::FormatRegistry;

pub use mtlx_core::{Document, Element, ElementId};
