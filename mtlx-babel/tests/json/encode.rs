//! Encode tests (element tree → JSON)

use super::{fixture_path, parse_mtlx, read_fixture};
use mtlx_babel::formats::json::{encode_document, encode_document_to_text, Separators};
use mtlx_babel::{Document, Format, JsonFormat, JsonWriteOptions};
use mtlx_core::xml::{read_from_file, XmlReadOptions};

#[test]
fn test_marble_matches_fixture() {
    let doc = parse_mtlx(&read_fixture("marble.mtlx"));
    let json = JsonFormat::default().serialize(&doc).unwrap();
    assert_eq!(json, read_fixture("marble.json").trim_end());
}

#[test]
fn test_compact_output() {
    let doc = parse_mtlx(
        r#"<materialx version="1.39">
  <surfacematerial name="M1" type="material">
    <input name="base" type="float" value="1.0" />
  </surfacematerial>
</materialx>"#,
    );
    let text = encode_document_to_text(&doc, &JsonWriteOptions::compact()).unwrap();
    insta::assert_snapshot!(text, @r#"{"mimetype":"application/mtlx+json","materialx":{"version":"1.39","surfacematerial:M1":{"type":"material","input:base":{"type":"float","value":"1.0"}}}}"#);
}

#[test]
fn test_custom_indent_and_separators() {
    let doc = parse_mtlx(r#"<materialx version="1.39"><nodegraph name="NG" /></materialx>"#);
    let options = JsonWriteOptions::default()
        .with_indent(Some(4))
        .with_separators(Separators::new(" ,", " : "));
    let text = encode_document_to_text(&doc, &options).unwrap();
    insta::assert_snapshot!(text, @r#"
    {
        "mimetype" : "application/mtlx+json" ,
        "materialx" : {
            "version" : "1.39" ,
            "nodegraph:NG" : {}
        }
    }
    "#);
}

#[test]
fn test_predicate_drops_subtrees() {
    let doc = parse_mtlx(&read_fixture("marble.mtlx"));
    let options = JsonWriteOptions::default().with_element_predicate(|element| {
        element.category() != "nodegraph"
    });
    let json = encode_document(&doc, &options);
    let body = json["materialx"].as_object().unwrap();

    assert!(!body.contains_key("nodegraph:NG_marble"));
    assert!(body.contains_key("standard_surface:SR_marble"));
    assert!(body.contains_key("surfacematerial:Marble"));
}

#[test]
fn test_predicate_sees_nested_elements() {
    let doc = parse_mtlx(&read_fixture("marble.mtlx"));
    let options =
        JsonWriteOptions::default().with_element_predicate(|element| element.category() != "input");
    let json = encode_document(&doc, &options);

    let graph = json["materialx"]["nodegraph:NG_marble"].as_object().unwrap();
    let keys: Vec<_> = graph.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["noise3d:noise", "output:out"]);
    assert_eq!(
        json["materialx"]["nodegraph:NG_marble"]["noise3d:noise"],
        serde_json::json!({"type": "float"})
    );
}

#[test]
fn test_imported_library_is_not_written() {
    let mut library = Document::new();
    read_from_file(
        &mut library,
        fixture_path("stdlib_defs.mtlx"),
        &XmlReadOptions::default(),
    )
    .unwrap();

    let mut doc = parse_mtlx(&read_fixture("marble.mtlx"));
    doc.import_library(&library);
    assert!(doc.root_element().child("ND_noise3d_float").is_some());

    let json = JsonFormat::default().serialize(&doc).unwrap();
    assert_eq!(json, read_fixture("marble.json").trim_end());
}

#[test]
fn test_empty_document() {
    let text = encode_document_to_text(&Document::new(), &JsonWriteOptions::default()).unwrap();
    insta::assert_snapshot!(text, @r#"
    {
      "mimetype": "application/mtlx+json",
      "materialx": {}
    }
    "#);
}
