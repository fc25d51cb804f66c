//! quick-xml based reader
//!
//! Streams events from the source and builds elements as start tags arrive. Text, comments and
//! processing instructions carry nothing the element tree stores and are dropped.

use super::{XmlError, NAME_ATTRIBUTE, XINCLUDE_TAG};
use crate::document::{Document, ElementId, DOCUMENT_CATEGORY};
use crate::library::resolve_in_search_path;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct XmlReadOptions {
    /// Follow `xi:include` references. When off, include tags are ignored.
    pub resolve_xinclude: bool,
    /// Extra directories searched for includes after the including file's directory.
    pub search_path: Vec<PathBuf>,
}

impl Default for XmlReadOptions {
    fn default() -> Self {
        XmlReadOptions {
            resolve_xinclude: true,
            search_path: Vec::new(),
        }
    }
}

/// Read XML source into `doc`. Relative includes resolve against the search path only.
pub fn read_from_str(
    doc: &mut Document,
    source: &str,
    options: &XmlReadOptions,
) -> Result<(), XmlError> {
    let mut include_stack = Vec::new();
    TreeBuilder::new(doc, options, None, &mut include_stack).run(source)
}

/// Read an XML file into `doc`, recording the file as the document's source URI.
pub fn read_from_file(
    doc: &mut Document,
    path: impl AsRef<Path>,
    options: &XmlReadOptions,
) -> Result<(), XmlError> {
    let mut include_stack = Vec::new();
    read_file(doc, path.as_ref(), options, &mut include_stack)
}

fn read_file(
    doc: &mut Document,
    path: &Path,
    options: &XmlReadOptions,
    include_stack: &mut Vec<PathBuf>,
) -> Result<(), XmlError> {
    let source = fs::read_to_string(path).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if doc.source_uri().is_empty() {
        let root = doc.root();
        doc.set_source_uri(root, path.to_string_lossy());
    }

    include_stack.push(canonical(path));
    let result = TreeBuilder::new(doc, options, path.parent(), include_stack).run(&source);
    include_stack.pop();
    result
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

struct TreeBuilder<'a> {
    doc: &'a mut Document,
    options: &'a XmlReadOptions,
    base_dir: Option<&'a Path>,
    include_stack: &'a mut Vec<PathBuf>,
    /// One entry per open tag; `None` marks a tag whose content is ignored.
    open: Vec<Option<ElementId>>,
    seen_root: bool,
}

impl<'a> TreeBuilder<'a> {
    fn new(
        doc: &'a mut Document,
        options: &'a XmlReadOptions,
        base_dir: Option<&'a Path>,
        include_stack: &'a mut Vec<PathBuf>,
    ) -> Self {
        TreeBuilder {
            doc,
            options,
            base_dir,
            include_stack,
            open: Vec::new(),
            seen_root: false,
        }
    }

    fn run(mut self, source: &str) -> Result<(), XmlError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event().map_err(XmlError::parse)? {
                Event::Start(start) => {
                    let id = self.open_element(&start)?;
                    self.open.push(id);
                }
                Event::Empty(start) => {
                    self.open_element(&start)?;
                }
                Event::End(_) => {
                    self.open.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if self.seen_root {
            Ok(())
        } else {
            Err(XmlError::MissingRoot)
        }
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<Option<ElementId>, XmlError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attributes = collect_attributes(start)?;

        let parent = match self.open.last() {
            None => return self.open_root(tag, attributes),
            Some(None) => return Ok(None),
            Some(Some(parent)) => *parent,
        };

        if tag == XINCLUDE_TAG {
            if parent == self.doc.root() {
                self.include(&attributes)?;
            } else {
                debug!(parent = %self.doc.element(parent).name_path(), "ignoring nested include");
            }
            return Ok(None);
        }

        let name = attributes
            .iter()
            .find(|(key, _)| key == NAME_ATTRIBUTE)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| XmlError::MissingName {
                category: tag.clone(),
            })?;
        let id = self.doc.add_child(parent, &tag, &name)?;
        for (key, value) in attributes {
            if key != NAME_ATTRIBUTE {
                self.doc.set_attribute(id, key, value);
            }
        }
        Ok(Some(id))
    }

    fn open_root(
        &mut self,
        tag: String,
        attributes: Vec<(String, String)>,
    ) -> Result<Option<ElementId>, XmlError> {
        if self.seen_root {
            return Err(XmlError::Parse(format!(
                "unexpected second root element <{tag}>"
            )));
        }
        if tag != DOCUMENT_CATEGORY {
            return Err(XmlError::UnexpectedRoot(tag));
        }
        self.seen_root = true;
        let root = self.doc.root();
        for (key, value) in attributes {
            if !is_namespace_declaration(&key) {
                self.doc.set_attribute(root, key, value);
            }
        }
        Ok(Some(root))
    }

    fn include(&mut self, attributes: &[(String, String)]) -> Result<(), XmlError> {
        if !self.options.resolve_xinclude {
            return Ok(());
        }
        let Some((_, href)) = attributes.iter().find(|(key, _)| key == "href") else {
            debug!("include without href");
            return Ok(());
        };

        let mut search_path = Vec::with_capacity(self.options.search_path.len() + 1);
        if let Some(base) = self.base_dir {
            search_path.push(base.to_path_buf());
        }
        search_path.extend(self.options.search_path.iter().cloned());

        let href_path = Path::new(href);
        let path = self
            .base_dir
            .filter(|_| href_path.is_relative())
            .map(|base| base.join(href_path))
            .filter(|candidate| candidate.exists())
            .or_else(|| resolve_in_search_path(href_path, &search_path))
            .ok_or_else(|| XmlError::MissingInclude { href: href.clone() })?;

        if self.include_stack.contains(&canonical(&path)) {
            debug!(path = %path.display(), "skipping cyclic include");
            return Ok(());
        }

        let mut library = Document::new();
        read_file(&mut library, &path, self.options, self.include_stack)?;
        self.doc.import_library(&library);
        Ok(())
    }
}

fn collect_attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, XmlError> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(XmlError::parse)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(XmlError::parse)?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}
