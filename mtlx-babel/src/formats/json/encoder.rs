//! Element tree → JSON
//!
//! Depth-first walk. Each element becomes an object holding its attributes as string fields,
//! followed by its children under their `<category>:<name>` keys, both in document order.

use super::keys::encode_child_key;
use super::options::JsonWriteOptions;
use super::{writer, DOCUMENT_ROOT, MIMETYPE, MIMETYPE_KEY};
use crate::error::FormatError;
use mtlx_core::{Document, Element};
use serde_json::{Map, Value};
use tracing::trace;

/// Encode one element and its subtree.
///
/// Returns `None` when the element is skipped: it came from another file (non-empty source
/// URI), or the options' predicate rejects it.
pub fn encode_element(element: Element<'_>, options: &JsonWriteOptions) -> Option<Map<String, Value>> {
    if !element.source_uri().is_empty() {
        trace!(element = %element.name_path(), uri = element.source_uri(), "skipping library element");
        return None;
    }
    if let Some(predicate) = &options.element_predicate {
        if !predicate(element) {
            trace!(element = %element.name_path(), "element rejected by predicate");
            return None;
        }
    }

    let mut node = Map::new();
    copy_attributes(element, &mut node);
    encode_children(element, &mut node, options);
    Some(node)
}

/// Encode a whole document into the `{"mimetype": ..., "materialx": {...}}` wrapper.
pub fn encode_document(doc: &Document, options: &JsonWriteOptions) -> Value {
    let mut root = Map::new();
    root.insert(MIMETYPE_KEY.to_string(), Value::String(MIMETYPE.to_string()));

    let mut body = Map::new();
    let document = doc.root_element();
    copy_attributes(document, &mut body);
    encode_children(document, &mut body, options);

    root.insert(DOCUMENT_ROOT.to_string(), Value::Object(body));
    Value::Object(root)
}

/// Encode a document and write it as text.
pub fn encode_document_to_text(
    doc: &Document,
    options: &JsonWriteOptions,
) -> Result<String, FormatError> {
    writer::to_string(&encode_document(doc, options), options)
}

fn copy_attributes(element: Element<'_>, node: &mut Map<String, Value>) {
    for (name, value) in element.attributes() {
        node.insert(name.to_string(), Value::String(value.to_string()));
    }
}

fn encode_children(element: Element<'_>, node: &mut Map<String, Value>, options: &JsonWriteOptions) {
    for child in element.children() {
        if let Some(encoded) = encode_element(child, options) {
            node.insert(
                encode_child_key(child.category(), child.name()),
                Value::Object(encoded),
            );
        }
    }
}
