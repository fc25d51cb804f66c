//! Per-direction options for the JSON codec

use mtlx_core::document::ElementPredicate;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_INDENT: usize = 2;
pub const DEFAULT_ITEM_SEPARATOR: &str = ",";
pub const DEFAULT_KEY_SEPARATOR: &str = ": ";

/// Separators written between items and between a key and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    pub item: String,
    pub key: String,
}

impl Separators {
    pub fn new(item: impl Into<String>, key: impl Into<String>) -> Self {
        Separators {
            item: item.into(),
            key: key.into(),
        }
    }

    /// `,` and `:`, no whitespace.
    pub fn compact() -> Self {
        Separators::new(",", ":")
    }
}

impl Default for Separators {
    fn default() -> Self {
        Separators::new(DEFAULT_ITEM_SEPARATOR, DEFAULT_KEY_SEPARATOR)
    }
}

/// Options for writing JSON.
#[derive(Clone)]
pub struct JsonWriteOptions {
    /// Elements rejected by the predicate are skipped along with their subtree.
    pub element_predicate: Option<ElementPredicate>,
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    pub separators: Separators,
}

impl JsonWriteOptions {
    pub fn with_element_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(mtlx_core::Element<'_>) -> bool + Send + Sync + 'static,
    {
        self.element_predicate = Some(Arc::new(predicate));
        self
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    /// Single line output with `,` / `:` separators.
    pub fn compact() -> Self {
        JsonWriteOptions::default()
            .with_indent(None)
            .with_separators(Separators::compact())
    }
}

impl Default for JsonWriteOptions {
    fn default() -> Self {
        JsonWriteOptions {
            element_predicate: None,
            indent: Some(DEFAULT_INDENT),
            separators: Separators::default(),
        }
    }
}

impl fmt::Debug for JsonWriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWriteOptions")
            .field("element_predicate", &self.element_predicate.is_some())
            .field("indent", &self.indent)
            .field("separators", &self.separators)
            .finish()
    }
}

/// Why the decoder left an entry out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The parent already has a child with this name; the first one wins.
    DuplicateChild,
    /// Object value under a key that is not `<category>:<name>` with a non-empty category.
    UndecodableKey,
    /// Value is neither a string nor an object.
    UnsupportedValue,
    /// String under `name` on an element; the name comes from the child key.
    ReservedAttribute,
}

/// An entry the decoder skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Name path of the element being filled (empty for the document).
    pub parent: String,
    pub key: String,
    pub reason: SkipReason,
}

pub type SkipCallback = Arc<dyn Fn(&SkippedEntry) + Send + Sync>;

/// Options for reading JSON.
#[derive(Clone)]
pub struct JsonReadOptions {
    /// Run the document's version upgrade once decoding finishes.
    pub upgrade_version: bool,
    /// Called for every entry the decoder skips.
    pub on_skip: Option<SkipCallback>,
}

impl JsonReadOptions {
    pub fn with_upgrade_version(mut self, upgrade_version: bool) -> Self {
        self.upgrade_version = upgrade_version;
        self
    }

    pub fn with_skip_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SkippedEntry) + Send + Sync + 'static,
    {
        self.on_skip = Some(Arc::new(callback));
        self
    }
}

impl Default for JsonReadOptions {
    fn default() -> Self {
        JsonReadOptions {
            upgrade_version: true,
            on_skip: None,
        }
    }
}

impl fmt::Debug for JsonReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonReadOptions")
            .field("upgrade_version", &self.upgrade_version)
            .field("on_skip", &self.on_skip.is_some())
            .finish()
    }
}
