//! Library folders and file discovery
//!
//! Definition libraries are folders of `.mtlx` files. Loading them produces a single document
//! whose top-level elements are all marked with the file they came from, ready to be imported
//! into an authored document with [Document::import_library].

use crate::document::Document;
use crate::xml::{self, XmlError, XmlReadOptions};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Recursively collect files under `root` whose extension matches `extension`
/// (case-insensitive, without the dot). The result is sorted.
pub fn find_files(root: impl AsRef<Path>, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root.as_ref())
        .standard_filters(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extension))
        .collect();
    files.sort();
    files
}

/// Case-insensitive extension check (`extension` without the dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Resolve a possibly relative path: as given, then against each search directory in order.
pub fn resolve_in_search_path(path: &Path, search_path: &[PathBuf]) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    if path.is_absolute() {
        return None;
    }
    search_path
        .iter()
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.exists())
}

/// Load every `.mtlx` file found in `folders` into one library document.
///
/// Folders are resolved against `search_path`; folders that cannot be found are skipped.
/// Returns the library and the files that were read.
pub fn load_libraries(
    folders: &[PathBuf],
    search_path: &[PathBuf],
) -> Result<(Document, Vec<PathBuf>), XmlError> {
    let mut library = Document::new();
    let mut loaded = Vec::new();
    let options = XmlReadOptions {
        search_path: search_path.to_vec(),
        ..XmlReadOptions::default()
    };

    for folder in folders {
        let Some(folder) = resolve_in_search_path(folder, search_path) else {
            debug!(folder = %folder.display(), "library folder not found");
            continue;
        };
        for file in find_files(&folder, "mtlx") {
            let mut doc = Document::new();
            xml::read_from_file(&mut doc, &file, &options)?;
            library.import_library(&doc);
            loaded.push(file);
        }
    }

    info!(
        elements = library.children().count(),
        files = loaded.len(),
        "loaded library definitions"
    );
    Ok((library, loaded))
}
