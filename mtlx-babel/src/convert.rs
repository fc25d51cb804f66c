//! File-level conversions between MaterialX XML and JSON
//!
//! These are the building blocks of the command line tool: read one file, write the other
//! representation next to it (or into an output folder) under a derived name.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::json::{decode_document, writer, JsonReadOptions, JsonWriteOptions};
use crate::formats::{JsonFormat, MtlxFormat};
use crate::registry::FormatRegistry;
use mtlx_core::xml::{XmlReadOptions, XmlWriteOptions};
use mtlx_core::Document;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use mtlx_core::library::find_files;

/// Which way a file is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    XmlToJson,
    JsonToXml,
}

impl Direction {
    /// Extension (without the dot) of the files this direction reads.
    pub fn source_extension(self) -> &'static str {
        match self {
            Direction::XmlToJson => "mtlx",
            Direction::JsonToXml => "json",
        }
    }

    /// Suffix replacing the source extension in output names.
    pub fn output_suffix(self) -> &'static str {
        match self {
            Direction::XmlToJson => "_mtlx.json",
            Direction::JsonToXml => "_json.mtlx",
        }
    }

    /// Direction implied by a file's extension, if it is one we convert.
    pub fn from_path(path: &Path) -> Option<Direction> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("mtlx") {
            Some(Direction::XmlToJson)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Direction::JsonToXml)
        } else {
            None
        }
    }
}

/// Output path for `input`: the file stem plus the direction's suffix, placed in `output_dir`
/// when given and next to the input otherwise.
///
/// `shader.mtlx` becomes `shader_mtlx.json`; `shader.json` becomes `shader_json.mtlx`.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, direction: Direction) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{}", direction.output_suffix());
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Read and parse a JSON file.
pub fn read_json_file(path: impl AsRef<Path>) -> Result<Value, FormatError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| FormatError::io(path, err))?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a JSON value to a file using the indentation and separators of `options`.
pub fn write_json_file(
    value: &Value,
    path: impl AsRef<Path>,
    options: &JsonWriteOptions,
) -> Result<(), FormatError> {
    let path = path.as_ref();
    let text = writer::to_string(value, options)?;
    fs::write(path, text).map_err(|err| FormatError::io(path, err))
}

/// Read a MaterialX JSON file into a fresh document.
pub fn json_file_to_document(
    path: impl AsRef<Path>,
    options: &JsonReadOptions,
) -> Result<Document, FormatError> {
    let json = read_json_file(path)?;
    let mut doc = Document::new();
    decode_document(&json, &mut doc, options)?;
    Ok(doc)
}

/// Convert `input` to `output`, picking both formats from `registry` by file extension.
///
/// With `skip_empty` an input without elements is not written. The result tells whether
/// `output` was.
pub fn convert_file(
    registry: &FormatRegistry,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    skip_empty: bool,
) -> Result<bool, FormatError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = registry.for_path(input)?;
    let target = registry.for_path(output)?;
    convert_with(source, target, input, output, skip_empty)
}

/// Convert a JSON file to an XML file.
///
/// Returns `Ok(false)` without writing anything when the decoded document has no elements.
pub fn json_file_to_xml_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    read_options: &JsonReadOptions,
    write_options: &XmlWriteOptions,
) -> Result<bool, FormatError> {
    let source = JsonFormat::new(JsonWriteOptions::default(), read_options.clone());
    let target = MtlxFormat::new(XmlReadOptions::default(), write_options.clone());
    convert_with(&source, &target, input.as_ref(), output.as_ref(), true)
}

/// Convert an XML file to a JSON file.
pub fn xml_file_to_json_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    read_options: &XmlReadOptions,
    write_options: &JsonWriteOptions,
) -> Result<(), FormatError> {
    let source = MtlxFormat::new(read_options.clone(), XmlWriteOptions::default());
    let target = JsonFormat::new(write_options.clone(), JsonReadOptions::default());
    convert_with(&source, &target, input.as_ref(), output.as_ref(), false).map(|_| ())
}

fn convert_with(
    source: &dyn Format,
    target: &dyn Format,
    input: &Path,
    output: &Path,
    skip_empty: bool,
) -> Result<bool, FormatError> {
    let doc = source.read_file(input)?;
    if skip_empty && doc.children().next().is_none() {
        info!(input = %input.display(), "no elements read, nothing written");
        return Ok(false);
    }
    target.write_file(&doc, output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        from = source.name(),
        to = target.name(),
        "converted"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
<materialx version="1.39">
  <surfacematerial name="M1" type="material">
    <input name="base" value="1.0" />
  </surfacematerial>
</materialx>
"#;

    #[rstest]
    #[case("shader.mtlx", None, Direction::XmlToJson, "shader_mtlx.json")]
    #[case("dir/shader.mtlx", None, Direction::XmlToJson, "dir/shader_mtlx.json")]
    #[case("dir/shader.json", None, Direction::JsonToXml, "dir/shader_json.mtlx")]
    #[case("dir/shader.MTLX", Some("out"), Direction::XmlToJson, "out/shader_mtlx.json")]
    #[case("a.b.json", Some("out"), Direction::JsonToXml, "out/a.b_json.mtlx")]
    fn derives_output_paths(
        #[case] input: &str,
        #[case] output_dir: Option<&str>,
        #[case] direction: Direction,
        #[case] expected: &str,
    ) {
        let path = output_path_for(Path::new(input), output_dir.map(Path::new), direction);
        assert_eq!(path, PathBuf::from(expected));
    }

    #[rstest]
    #[case("a.mtlx", Some(Direction::XmlToJson))]
    #[case("a.JSON", Some(Direction::JsonToXml))]
    #[case("a.xml", None)]
    #[case("mtlx", None)]
    fn direction_from_extension(#[case] path: &str, #[case] expected: Option<Direction>) {
        assert_eq!(Direction::from_path(Path::new(path)), expected);
    }

    #[test]
    fn converts_xml_to_json_and_back() {
        let dir = tempdir().unwrap();
        let xml_path = dir.path().join("material.mtlx");
        fs::write(&xml_path, SAMPLE_XML).unwrap();

        let json_path = output_path_for(&xml_path, None, Direction::XmlToJson);
        xml_file_to_json_file(
            &xml_path,
            &json_path,
            &XmlReadOptions::default(),
            &JsonWriteOptions::default(),
        )
        .unwrap();
        let json = read_json_file(&json_path).unwrap();
        assert_eq!(json["materialx"]["surfacematerial:M1"]["type"], "material");

        let back_path = output_path_for(&json_path, None, Direction::JsonToXml);
        let written = json_file_to_xml_file(
            &json_path,
            &back_path,
            &JsonReadOptions::default(),
            &XmlWriteOptions::default(),
        )
        .unwrap();
        assert!(written);
        assert_eq!(back_path, dir.path().join("material_mtlx_json.mtlx"));
        assert_eq!(fs::read_to_string(back_path).unwrap(), SAMPLE_XML);
    }

    #[test]
    fn empty_json_document_writes_nothing() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("empty.json");
        fs::write(
            &json_path,
            r#"{"mimetype": "application/mtlx+json", "materialx": {"version": "1.39"}}"#,
        )
        .unwrap();
        let out = dir.path().join("empty_json.mtlx");
        let written = json_file_to_xml_file(
            &json_path,
            &out,
            &JsonReadOptions::default(),
            &XmlWriteOptions::default(),
        )
        .unwrap();
        assert!(!written);
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_json_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, FormatError::Io { .. }));
    }

    #[test]
    fn foreign_json_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "not-materialx"}"#).unwrap();
        let err = json_file_to_document(&path, &JsonReadOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::NotAMaterialDocument));
    }

    #[test]
    fn registry_picks_formats_from_paths() {
        let dir = tempdir().unwrap();
        let xml_path = dir.path().join("material.mtlx");
        fs::write(&xml_path, SAMPLE_XML).unwrap();

        let mut registry = FormatRegistry::with_defaults();
        registry.register(JsonFormat::new(
            JsonWriteOptions::compact(),
            JsonReadOptions::default(),
        ));
        let json_path = output_path_for(&xml_path, None, Direction::XmlToJson);
        assert!(convert_file(&registry, &xml_path, &json_path, false).unwrap());
        assert_eq!(
            fs::read_to_string(&json_path).unwrap(),
            r#"{"mimetype":"application/mtlx+json","materialx":{"version":"1.39","surfacematerial:M1":{"type":"material","input:base":{"value":"1.0"}}}}"#
        );

        let back_path = output_path_for(&json_path, Some(dir.path()), Direction::JsonToXml);
        assert!(convert_file(&registry, &json_path, &back_path, true).unwrap());
        assert_eq!(fs::read_to_string(back_path).unwrap(), SAMPLE_XML);
    }

    #[test]
    fn registry_conversion_can_skip_empty_documents() {
        let dir = tempdir().unwrap();
        let registry = FormatRegistry::with_defaults();
        let xml_path = dir.path().join("empty.mtlx");
        fs::write(&xml_path, "<materialx version=\"1.39\" />").unwrap();
        let out = dir.path().join("empty_mtlx.json");

        assert!(!convert_file(&registry, &xml_path, &out, true).unwrap());
        assert!(!out.exists());

        assert!(convert_file(&registry, &xml_path, &out, false).unwrap());
        let json = read_json_file(&out).unwrap();
        assert_eq!(json["materialx"]["version"], "1.39");
    }

    #[test]
    fn unknown_extension_is_reported() {
        let dir = tempdir().unwrap();
        let err = convert_file(
            &FormatRegistry::with_defaults(),
            dir.path().join("scene.usda"),
            dir.path().join("scene.json"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, FormatError::FormatNotFound(ext) if ext == ".usda"));
    }
}
