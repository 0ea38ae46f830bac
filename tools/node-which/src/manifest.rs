///
/// # Manifest Parsing
///
/// Types and functions for reading `package.json` files. Only the fields the
/// report and the entrypoint check need are modelled; everything else in the
/// file is ignored, so manifests with unusual extra keys still load.
///
/// Both `name` and `version` are optional. Private workspace roots routinely
/// omit them, and the tool must still be able to describe where it was run.
///
/// ## Example package.json
///
/// ```json
/// {
///   "name": "my-app",
///   "version": "1.4.0",
///   "main": "dist/index.js"
/// }
/// ```
///

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::errors::WhichError;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Kept as raw JSON; only its presence matters here, since an `exports`
    /// map takes over from `main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<serde_json::Value>,
}

impl PackageManifest {
    /// `name @ version`, with placeholders for whichever half is missing.
    pub fn label(&self) -> String {
        format!(
            "{} @ {}",
            self.name.as_deref().unwrap_or("(unnamed)"),
            self.version.as_deref().unwrap_or("(unversioned)"),
        )
    }
}

pub fn parse_manifest(path: &Path) -> Result<PackageManifest, WhichError> {
    let content = std::fs::read_to_string(path).map_err(|e| WhichError::ManifestRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_manifest_str(&content).map_err(|e| WhichError::ManifestParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn parse_manifest_str(content: &str) -> Result<PackageManifest, serde_json::Error> {
    serde_json::from_str(content)
}
