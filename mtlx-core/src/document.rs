//! Arena-backed element tree
//!
//!     The document owns every element it contains. Element storage is a flat `Vec` indexed by
//!     [ElementId]; the document element itself always lives at index 0 and has the category
//!     `materialx`. Its attributes are the document's attributes (`version`, `colorspace`, ...)
//!     and its children are the document's top-level elements.
//!
//!     Elements are never removed, so an id stays valid for the lifetime of its document. Ids are
//!     only meaningful for the document that produced them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Category of the document element, also the XML root tag.
pub const DOCUMENT_CATEGORY: &str = "materialx";

static INVALID_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_:]").expect("valid name regex"));

/// Predicate used by writers to decide whether an element (and its subtree) is written.
pub type ElementPredicate = Arc<dyn Fn(Element<'_>) -> bool + Send + Sync>;

/// Structural errors raised while building a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("element category must not be empty")]
    EmptyCategory,
    #[error("'{parent}' already has a child named '{name}'")]
    DuplicateName { parent: String, name: String },
}

/// Handle to an element inside a [Document].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Node {
    category: String,
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<ElementId>,
    child_index: HashMap<String, ElementId>,
    parent: Option<ElementId>,
    source_uri: String,
}

impl Node {
    fn new(category: &str, name: &str, parent: Option<ElementId>) -> Self {
        Node {
            category: category.to_string(),
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            child_index: HashMap::new(),
            parent,
            source_uri: String::new(),
        }
    }
}

/// A MaterialX document: the owner of an element tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document (no attributes, no children).
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::new(DOCUMENT_CATEGORY, "", None)],
        }
    }

    /// The document element.
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn root_element(&self) -> Element<'_> {
        self.element(self.root())
    }

    /// Borrow a read-only view of an element.
    pub fn element(&self, id: ElementId) -> Element<'_> {
        Element { doc: self, id }
    }

    /// Top-level elements of the document, in order.
    pub fn children(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        self.root_element().children()
    }

    /// Document-level attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root_element().attribute(name)
    }

    /// True when the document has neither attributes nor children.
    pub fn is_empty(&self) -> bool {
        let root = &self.nodes[0];
        root.attributes.is_empty() && root.children.is_empty()
    }

    /// Provenance of the document itself (usually the file it was read from).
    pub fn source_uri(&self) -> &str {
        &self.nodes[0].source_uri
    }

    /// Set an attribute, replacing the value in place if the name already exists.
    pub fn set_attribute(&mut self, id: ElementId, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let attributes = &mut self.nodes[id.0].attributes;
        match attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => attributes.push((name, value)),
        }
    }

    pub fn set_source_uri(&mut self, id: ElementId, uri: impl Into<String>) {
        self.nodes[id.0].source_uri = uri.into();
    }

    /// Create a child of the given category and name and attach it as the last child of
    /// `parent`.
    ///
    /// An empty name is replaced by a generated one (`<category>1`, `<category>2`, ...) that is
    /// unique under `parent`.
    pub fn add_child(
        &mut self,
        parent: ElementId,
        category: &str,
        name: &str,
    ) -> Result<ElementId, TreeError> {
        if category.is_empty() {
            return Err(TreeError::EmptyCategory);
        }
        let name = if name.is_empty() {
            self.create_valid_child_name(parent, &format!("{category}1"))
        } else {
            name.to_string()
        };
        if self.nodes[parent.0].child_index.contains_key(&name) {
            return Err(TreeError::DuplicateName {
                parent: self.element(parent).name_path(),
                name,
            });
        }
        Ok(self.attach(parent, category, &name))
    }

    /// Turn `base` into a name that is valid and not yet used by a child of `parent`.
    ///
    /// Characters outside `[A-Za-z0-9_:]` become `_`; a clash increments the trailing number
    /// (or appends `2` when there is none).
    pub fn create_valid_child_name(&self, parent: ElementId, base: &str) -> String {
        let mut name = INVALID_NAME_CHARS.replace_all(base, "_").into_owned();
        let index = &self.nodes[parent.0].child_index;
        while index.contains_key(&name) {
            name = increment_name(&name);
        }
        name
    }

    /// Copy the top-level elements of `library` into this document.
    ///
    /// Copies keep their own source URI, or take the library's when they have none, so that
    /// writers can tell them apart from authored content. Names that already exist here win.
    pub fn import_library(&mut self, library: &Document) {
        let root = self.root();
        for element in library.children() {
            if self.nodes[root.0].child_index.contains_key(element.name()) {
                debug!(
                    name = element.name(),
                    "skipping library element, name already present"
                );
                continue;
            }
            let copy = self.copy_subtree(root, element);
            if element.source_uri().is_empty() {
                self.set_source_uri(copy, library.source_uri());
            }
        }
    }

    /// Structural comparison of two documents: categories, names, attributes (in order) and
    /// children (in order). Source URIs are not compared.
    pub fn is_equivalent(&self, other: &Document) -> bool {
        self.root_element().is_equivalent(other.root_element())
    }

    fn copy_subtree(&mut self, parent: ElementId, source: Element<'_>) -> ElementId {
        let id = self.attach(parent, source.category(), source.name());
        for (name, value) in source.attributes() {
            self.set_attribute(id, name, value);
        }
        self.set_source_uri(id, source.source_uri());
        for child in source.children() {
            self.copy_subtree(id, child);
        }
        id
    }

    fn attach(&mut self, parent: ElementId, category: &str, name: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node::new(category, name, Some(parent)));
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(id);
        parent_node.child_index.insert(name.to_string(), id);
        id
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn increment_name(name: &str) -> String {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &name[stem.len()..];
    match digits.parse::<u64>().ok().and_then(|number| number.checked_add(1)) {
        Some(next) => format!("{stem}{next}"),
        None => format!("{name}2"),
    }
}

/// Read-only view of one element.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: ElementId,
}

impl<'a> Element<'a> {
    fn node(&self) -> &'a Node {
        &self.doc.nodes[self.id.0]
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn category(&self) -> &'a str {
        &self.node().category
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attributes as `(name, value)` pairs in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.node()
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let doc = self.doc;
        self.node()
            .children
            .iter()
            .map(move |&id| Element { doc, id })
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// Child lookup by name, regardless of category.
    pub fn child(&self, name: &str) -> Option<Element<'a>> {
        let doc = self.doc;
        self.node()
            .child_index
            .get(name)
            .map(|&id| Element { doc, id })
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        let doc = self.doc;
        self.node().parent.map(|id| Element { doc, id })
    }

    pub fn source_uri(&self) -> &'a str {
        &self.node().source_uri
    }

    /// Slash-separated names from the top-level element down to this one. The document
    /// element's path is empty.
    pub fn name_path(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(*self);
        while let Some(element) = current {
            if element.parent().is_some() {
                names.push(element.name());
            }
            current = element.parent();
        }
        names.reverse();
        names.join("/")
    }

    pub fn is_equivalent(&self, other: Element<'_>) -> bool {
        self.category() == other.category()
            && self.name() == other.name()
            && self.node().attributes == other.node().attributes
            && self.child_count() == other.child_count()
            && self
                .children()
                .zip(other.children())
                .all(|(left, right)| left.is_equivalent(right))
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("category", &self.category())
            .field("name", &self.name())
            .field("attributes", &self.node().attributes)
            .field("children", &self.child_count())
            .finish()
    }
}
