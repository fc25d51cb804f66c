//! Shared configuration loader for the mtlxjson tools.
//!
//! `defaults/mtlxjson.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MtlxJsonConfig`],
//! then turn the sections into codec options with the `*_options` helpers.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use mtlx_babel::formats::json::Separators;
use mtlx_babel::{FormatRegistry, JsonFormat, JsonReadOptions, JsonWriteOptions, MtlxFormat};
use mtlx_core::xml::{XmlReadOptions, XmlWriteOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/mtlxjson.default.toml");

/// Name of the per-directory configuration file picked up by the CLI.
pub const LOCAL_CONFIG_FILE: &str = "mtlxjson.toml";

/// Top-level configuration consumed by mtlxjson applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MtlxJsonConfig {
    pub json: JsonConfig,
    pub read: ReadConfig,
    pub xml: XmlConfig,
}

/// JSON text layout.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub indent: usize,
    pub item_separator: String,
    pub key_separator: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadConfig {
    pub upgrade_version: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlConfig {
    pub write_xinclude: bool,
    pub library_paths: Vec<PathBuf>,
}

impl MtlxJsonConfig {
    /// Options for writing JSON. An indent of 0 means single line output.
    pub fn json_write_options(&self) -> JsonWriteOptions {
        let indent = match self.json.indent {
            0 => None,
            width => Some(width),
        };
        JsonWriteOptions::default()
            .with_indent(indent)
            .with_separators(Separators::new(
                self.json.item_separator.as_str(),
                self.json.key_separator.as_str(),
            ))
    }

    pub fn json_read_options(&self) -> JsonReadOptions {
        JsonReadOptions::default().with_upgrade_version(self.read.upgrade_version)
    }

    pub fn xml_read_options(&self) -> XmlReadOptions {
        XmlReadOptions {
            search_path: self.xml.library_paths.clone(),
            ..XmlReadOptions::default()
        }
    }

    pub fn xml_write_options(&self) -> XmlWriteOptions {
        XmlWriteOptions {
            write_xinclude: self.xml.write_xinclude,
            ..XmlWriteOptions::default()
        }
    }

    /// `mtlx` and `json` formats built from these settings.
    pub fn format_registry(&self) -> FormatRegistry {
        let mut registry = FormatRegistry::new();
        registry.register(MtlxFormat::new(
            self.xml_read_options(),
            self.xml_write_options(),
        ));
        registry.register(JsonFormat::new(
            self.json_write_options(),
            self.json_read_options(),
        ));
        registry
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MtlxJsonConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MtlxJsonConfig, ConfigError> {
    Loader::new().build()
}
