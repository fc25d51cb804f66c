//! JSON format integration tests
//!
//! Fixtures live in `tests/fixtures`; `marble.mtlx` and `marble.json` are the same document in
//! both representations.

mod decode;
mod encode;
mod roundtrip;

use mtlx_babel::{Document, Format, MtlxFormat};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

pub fn parse_mtlx(source: &str) -> Document {
    MtlxFormat::default()
        .parse(source)
        .expect("Failed to parse MaterialX source")
}
