//! Document version stamping
//!
//! The `version` attribute of the document element records which revision of the format a
//! document was authored against. Readers of other formats call [Document::upgrade_version]
//! after building a tree so downstream tools see the latest revision.

use crate::document::Document;
use tracing::debug;

/// Latest format revision this crate writes.
pub const LATEST_VERSION: &str = "1.39";

pub const VERSION_ATTRIBUTE: &str = "version";

/// Parse a `major.minor` version string. A missing minor part reads as 0.
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => minor.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

impl Document {
    pub fn version(&self) -> Option<&str> {
        self.attribute(VERSION_ATTRIBUTE)
    }

    /// Upgrade the document to [LATEST_VERSION].
    ///
    /// Documents without a version, with an unreadable one, or already at (or past) the latest
    /// revision are left untouched. Returns whether the document changed.
    pub fn upgrade_version(&mut self) -> bool {
        let Some(current) = self.version().and_then(parse_version) else {
            return false;
        };
        let latest = parse_version(LATEST_VERSION).unwrap_or_default();
        if current >= latest {
            return false;
        }
        debug!(from = ?current, to = LATEST_VERSION, "upgrading document version");
        let root = self.root();
        self.set_attribute(root, VERSION_ATTRIBUTE, LATEST_VERSION);
        true
    }
}
