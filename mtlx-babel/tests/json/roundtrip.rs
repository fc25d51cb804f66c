//! Property-based round trips through the JSON form
//!
//! Random trees are encoded and decoded again; the result must be equivalent to the input and
//! encode to the same text.

use super::{parse_mtlx, read_fixture};
use mtlx_babel::formats::json::{decode_document_from_text, encode_document_to_text};
use mtlx_babel::{Document, ElementId, Format, JsonFormat, JsonReadOptions, JsonWriteOptions};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct TreeNode {
    category: String,
    attributes: Vec<(String, String)>,
    children: Vec<TreeNode>,
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("input".to_string()),
        Just("output".to_string()),
        Just("nodegraph".to_string()),
        "[a-z][a-z0-9_]{0,8}",
    ]
}

/// Attribute names never collide with `mimetype`, which the decoder drops.
fn attributes_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("a_[a-z]{0,6}", "[ -~]{0,12}"), 0..4)
}

fn node_strategy() -> impl Strategy<Value = TreeNode> {
    let leaf = (category_strategy(), attributes_strategy()).prop_map(|(category, attributes)| {
        TreeNode {
            category,
            attributes,
            children: Vec::new(),
        }
    });
    leaf.prop_recursive(3, 32, 4, |inner| {
        (
            category_strategy(),
            attributes_strategy(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(category, attributes, children)| TreeNode {
                category,
                attributes,
                children,
            })
    })
}

fn build(doc: &mut Document, parent: ElementId, nodes: &[TreeNode]) {
    for (index, node) in nodes.iter().enumerate() {
        let child = doc
            .add_child(parent, &node.category, &format!("n{index}"))
            .unwrap();
        for (name, value) in &node.attributes {
            doc.set_attribute(child, name.as_str(), value.as_str());
        }
        build(doc, child, &node.children);
    }
}

fn document_from(nodes: &[TreeNode]) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_attribute(root, "version", "1.39");
    build(&mut doc, root, nodes);
    doc
}

fn write_options() -> impl Strategy<Value = JsonWriteOptions> {
    prop_oneof![
        Just(JsonWriteOptions::default()),
        Just(JsonWriteOptions::compact()),
        (0usize..6).prop_map(|indent| JsonWriteOptions::default().with_indent(Some(indent))),
    ]
}

proptest! {
    #[test]
    fn test_decode_inverts_encode(
        nodes in prop::collection::vec(node_strategy(), 0..5),
        options in write_options(),
    ) {
        let doc = document_from(&nodes);
        let text = encode_document_to_text(&doc, &options).unwrap();

        let mut decoded = Document::new();
        let read_options = JsonReadOptions::default().with_upgrade_version(false);
        decode_document_from_text(&text, &mut decoded, &read_options).unwrap();

        prop_assert!(decoded.is_equivalent(&doc));
        prop_assert_eq!(encode_document_to_text(&decoded, &options).unwrap(), text);
    }
}

#[test]
fn test_marble_survives_xml_json_xml() {
    let source = read_fixture("marble.mtlx");
    let doc = parse_mtlx(&source);

    let json = JsonFormat::default();
    let decoded = json.parse(&json.serialize(&doc).unwrap()).unwrap();
    assert!(decoded.is_equivalent(&doc));
}

#[test]
fn test_reencoding_is_idempotent() {
    let format = JsonFormat::new(
        JsonWriteOptions::default(),
        JsonReadOptions::default().with_upgrade_version(false),
    );
    let text = read_fixture("marble.json");
    let once = format.serialize(&format.parse(&text).unwrap()).unwrap();
    let twice = format.serialize(&format.parse(&once).unwrap()).unwrap();
    assert_eq!(once, text.trim_end());
    assert_eq!(twice, once);
}
