//! Decode tests (JSON → element tree)

use super::{fixture_path, parse_mtlx, read_fixture};
use mtlx_babel::convert::json_file_to_document;
use mtlx_babel::formats::json::{decode_document_from_text, SkipReason};
use mtlx_babel::{Document, Format, FormatError, FormatRegistry, JsonReadOptions, MtlxFormat};
use rstest::rstest;
use std::sync::{Arc, Mutex};

#[test]
fn test_marble_matches_fixture() {
    let doc = json_file_to_document(fixture_path("marble.json"), &JsonReadOptions::default())
        .unwrap();
    let expected = parse_mtlx(&read_fixture("marble.mtlx"));
    assert!(doc.is_equivalent(&expected));

    let xml = MtlxFormat::default().serialize(&doc).unwrap();
    assert_eq!(xml, read_fixture("marble.mtlx"));
}

#[test]
fn test_legacy_version_is_upgraded() {
    let doc = json_file_to_document(fixture_path("legacy.json"), &JsonReadOptions::default())
        .unwrap();
    assert_eq!(doc.version(), Some(mtlx_core::LATEST_VERSION));

    let kept = json_file_to_document(
        fixture_path("legacy.json"),
        &JsonReadOptions::default().with_upgrade_version(false),
    )
    .unwrap();
    assert_eq!(kept.version(), Some("1.38"));
}

#[rstest]
#[case::no_mimetype(r#"{"materialx": {}}"#)]
#[case::wrong_mimetype(r#"{"mimetype": "text/plain", "materialx": {}}"#)]
#[case::array(r#"[{"mimetype": "application/mtlx+json"}]"#)]
#[case::string(r#""application/mtlx+json""#)]
fn test_not_a_material_document(#[case] source: &str) {
    let mut doc = Document::new();
    let err = decode_document_from_text(source, &mut doc, &JsonReadOptions::default()).unwrap_err();
    assert!(matches!(err, FormatError::NotAMaterialDocument));
    assert!(doc.is_empty());
}

#[test]
fn test_missing_document_root() {
    let registry = FormatRegistry::with_defaults();
    let err = registry
        .get("json")
        .unwrap()
        .parse(r#"{"mimetype": "application/mtlx+json"}"#)
        .unwrap_err();
    assert!(matches!(err, FormatError::MissingDocumentRoot));
}

#[rstest]
#[case::truncated(r#"{"mimetype": "application/mtlx+json", "materialx": {"#)]
#[case::trailing_comma(r#"{"mimetype": "application/mtlx+json",}"#)]
#[case::empty("")]
fn test_malformed_text(#[case] source: &str) {
    let registry = FormatRegistry::with_defaults();
    let err = registry.for_extension("json").unwrap().parse(source).unwrap_err();
    assert!(matches!(err, FormatError::MalformedText(_)));
}

#[test]
fn test_skips_are_reported_with_their_parent() {
    let skipped = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&skipped);
    let options = JsonReadOptions::default()
        .with_skip_callback(move |entry| sink.lock().unwrap().push(entry.clone()));

    let mut doc = Document::new();
    decode_document_from_text(
        r#"{
          "mimetype": "application/mtlx+json",
          "materialx": {
            "version": "1.39",
            "nodegraph:NG": {
              "input:in1": {"type": "float"},
              "input:in1": {"type": "color3"},
              "in2": {},
              "count": 2
            }
          }
        }"#,
        &mut doc,
        &options,
    )
    .unwrap();

    // serde_json keeps the last value of a repeated key, so only one in1 reaches the decoder
    let graph = doc.root_element().child("NG").unwrap();
    assert_eq!(graph.child("in1").unwrap().attribute("type"), Some("color3"));

    let skipped = skipped.lock().unwrap();
    let reasons: Vec<_> = skipped
        .iter()
        .map(|entry| (entry.parent.as_str(), entry.key.as_str(), entry.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("NG", "in2", SkipReason::UndecodableKey),
            ("NG", "count", SkipReason::UnsupportedValue),
        ]
    );
}

#[test]
fn test_decodes_into_existing_document() {
    let mut doc = parse_mtlx(r#"<materialx version="1.39"><nodegraph name="NG" /></materialx>"#);
    decode_document_from_text(
        r#"{"mimetype": "application/mtlx+json", "materialx": {"nodegraph:NG": {"x": "1"}, "nodegraph:NG2": {}}}"#,
        &mut doc,
        &JsonReadOptions::default(),
    )
    .unwrap();

    let names: Vec<_> = doc.children().map(|child| child.name()).collect();
    assert_eq!(names, vec!["NG", "NG2"]);
    assert_eq!(doc.root_element().child("NG").unwrap().attribute("x"), None);
}

#[test]
fn test_name_entry_does_not_duplicate_xml_name() {
    let skipped = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&skipped);
    let options = JsonReadOptions::default()
        .with_skip_callback(move |entry| sink.lock().unwrap().push(entry.clone()));

    let mut doc = Document::new();
    decode_document_from_text(
        r#"{"mimetype": "application/mtlx+json", "materialx": {"nodegraph:NG": {"name": "other"}}}"#,
        &mut doc,
        &options,
    )
    .unwrap();

    let xml = MtlxFormat::default().serialize(&doc).unwrap();
    assert_eq!(xml.matches("name=").count(), 1);
    assert!(xml.contains(r#"<nodegraph name="NG" />"#));

    let reread = parse_mtlx(&xml);
    let graph = reread.root_element().child("NG").unwrap();
    assert_eq!(graph.attribute("name"), None);
    assert_eq!(
        skipped.lock().unwrap()[0].reason,
        SkipReason::ReservedAttribute
    );
}
