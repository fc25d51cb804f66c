//! JSON → element tree
//!
//! The decoder is permissive: once the wrapper has been validated nothing fails. String values
//! become attributes, object values become children, everything else is skipped and reported
//! through [JsonReadOptions::on_skip] and the `debug` log.

use super::keys::decode_child_key;
use super::options::{JsonReadOptions, SkipReason, SkippedEntry};
use super::{DOCUMENT_ROOT, MIMETYPE, MIMETYPE_KEY};
use crate::error::FormatError;
use mtlx_core::xml::NAME_ATTRIBUTE;
use mtlx_core::{Document, ElementId};
use serde_json::{Map, Value};
use tracing::debug;

/// Decode the entries of `node` into the element `target`.
///
/// - the mimetype marker is skipped wherever it appears;
/// - a string value sets (or overwrites) the attribute of that name, except `name` below the
///   document, which would clash with the element's own name;
/// - an object under `materialx` is decoded into `target` itself;
/// - any other object is a child keyed `<category>:<name>`. It is created and filled unless
///   `target` already has a child with that name, in which case it is dropped.
pub fn decode_into(
    node: &Map<String, Value>,
    doc: &mut Document,
    target: ElementId,
    options: &JsonReadOptions,
) {
    for (key, value) in node {
        if key == MIMETYPE_KEY {
            continue;
        }
        match value {
            Value::String(_) if key == NAME_ATTRIBUTE && target != doc.root() => {
                skip(doc, target, key, SkipReason::ReservedAttribute, options)
            }
            Value::String(text) => doc.set_attribute(target, key.as_str(), text.as_str()),
            Value::Object(body) if key == DOCUMENT_ROOT => decode_into(body, doc, target, options),
            Value::Object(body) => match decode_child_key(key) {
                Some((category, name)) if !category.is_empty() => {
                    if doc.element(target).child(name).is_some() {
                        skip(doc, target, key, SkipReason::DuplicateChild, options);
                        continue;
                    }
                    match doc.add_child(target, category, name) {
                        Ok(child) => decode_into(body, doc, child, options),
                        Err(err) => {
                            debug!(key = key.as_str(), error = %err, "could not create child");
                            skip(doc, target, key, SkipReason::UndecodableKey, options);
                        }
                    }
                }
                _ => skip(doc, target, key, SkipReason::UndecodableKey, options),
            },
            _ => skip(doc, target, key, SkipReason::UnsupportedValue, options),
        }
    }
}

/// Decode a wrapped JSON document into `doc`.
///
/// The mimetype marker and the `materialx` body are checked before anything is written, so a
/// rejected payload leaves `doc` untouched. When `options.upgrade_version` is set the document
/// is upgraded once decoding is done.
pub fn decode_document(
    json: &Value,
    doc: &mut Document,
    options: &JsonReadOptions,
) -> Result<(), FormatError> {
    let Some(object) = json.as_object() else {
        return Err(FormatError::NotAMaterialDocument);
    };
    match object.get(MIMETYPE_KEY) {
        Some(Value::String(mimetype)) if mimetype == MIMETYPE => {}
        _ => return Err(FormatError::NotAMaterialDocument),
    }
    if !object.contains_key(DOCUMENT_ROOT) {
        return Err(FormatError::MissingDocumentRoot);
    }

    let root = doc.root();
    decode_into(object, doc, root, options);

    if options.upgrade_version {
        doc.upgrade_version();
    }
    Ok(())
}

/// Parse JSON text and decode it into `doc`.
pub fn decode_document_from_text(
    text: &str,
    doc: &mut Document,
    options: &JsonReadOptions,
) -> Result<(), FormatError> {
    let json: Value = serde_json::from_str(text)?;
    decode_document(&json, doc, options)
}

fn skip(doc: &Document, parent: ElementId, key: &str, reason: SkipReason, options: &JsonReadOptions) {
    let entry = SkippedEntry {
        parent: doc.element(parent).name_path(),
        key: key.to_string(),
        reason,
    };
    debug!(parent = %entry.parent, key, reason = ?reason, "skipping JSON entry");
    if let Some(callback) = &options.on_skip {
        callback(&entry);
    }
}
