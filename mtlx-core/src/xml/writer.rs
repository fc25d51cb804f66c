//! Indented XML writer
//!
//! Output follows the usual MaterialX layout: an XML declaration, two-space indentation, the
//! `name` attribute first, self-closing tags for leaf elements.

use super::{XmlError, NAME_ATTRIBUTE, XINCLUDE_NAMESPACE, XINCLUDE_TAG};
use crate::document::{Document, Element, ElementPredicate, DOCUMENT_CATEGORY};
use quick_xml::escape::escape;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone)]
pub struct XmlWriteOptions {
    /// Write elements imported from other files as `xi:include` lines.
    pub write_xinclude: bool,
    /// Elements rejected by the predicate are not written, nor is their subtree.
    pub element_predicate: Option<ElementPredicate>,
}

impl Default for XmlWriteOptions {
    fn default() -> Self {
        XmlWriteOptions {
            write_xinclude: true,
            element_predicate: None,
        }
    }
}

impl fmt::Debug for XmlWriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlWriteOptions")
            .field("write_xinclude", &self.write_xinclude)
            .field("element_predicate", &self.element_predicate.is_some())
            .finish()
    }
}

pub fn write_to_string(doc: &Document, options: &XmlWriteOptions) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n");
    let includes = if options.write_xinclude {
        include_references(doc)
    } else {
        Vec::new()
    };

    let root = doc.root_element();
    out.push('<');
    out.push_str(DOCUMENT_CATEGORY);
    for (name, value) in root.attributes() {
        push_attribute(&mut out, name, value);
    }
    if !includes.is_empty() {
        push_attribute(&mut out, "xmlns:xi", XINCLUDE_NAMESPACE);
    }

    let children: Vec<_> = root
        .children()
        .filter(|child| is_written(*child, options))
        .collect();
    if children.is_empty() && includes.is_empty() {
        out.push_str(" />\n");
        return out;
    }

    out.push_str(">\n");
    for href in includes {
        out.push_str("  <");
        out.push_str(XINCLUDE_TAG);
        push_attribute(&mut out, "href", href);
        out.push_str(" />\n");
    }
    for child in children {
        write_element(&mut out, child, 1, options);
    }
    out.push_str("</");
    out.push_str(DOCUMENT_CATEGORY);
    out.push_str(">\n");
    out
}

pub fn write_to_file(
    doc: &Document,
    path: impl AsRef<Path>,
    options: &XmlWriteOptions,
) -> Result<(), XmlError> {
    let path = path.as_ref();
    fs::write(path, write_to_string(doc, options)).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_element(out: &mut String, element: Element<'_>, depth: usize, options: &XmlWriteOptions) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(element.category());
    if !element.name().is_empty() {
        push_attribute(out, NAME_ATTRIBUTE, element.name());
    }
    for (name, value) in element.attributes() {
        if name != NAME_ATTRIBUTE {
            push_attribute(out, name, value);
        }
    }

    let children: Vec<_> = element
        .children()
        .filter(|child| is_written(*child, options))
        .collect();
    if children.is_empty() {
        out.push_str(" />\n");
        return;
    }

    out.push_str(">\n");
    for child in children {
        write_element(out, child, depth + 1, options);
    }
    out.push_str(&indent);
    out.push_str("</");
    out.push_str(element.category());
    out.push_str(">\n");
}

fn is_written(element: Element<'_>, options: &XmlWriteOptions) -> bool {
    element.source_uri().is_empty()
        && options
            .element_predicate
            .as_ref()
            .map_or(true, |predicate| predicate(element))
}

/// Distinct source URIs of imported top-level elements, in first-seen order.
fn include_references(doc: &Document) -> Vec<&str> {
    let mut references: Vec<&str> = Vec::new();
    for child in doc.children() {
        let uri = child.source_uri();
        if !uri.is_empty() && uri != doc.source_uri() && !references.contains(&uri) {
            references.push(uri);
        }
    }
    references
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}
