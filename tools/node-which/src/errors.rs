///
/// node-which error types.
///
/// Everything that can abort a lookup: unreadable or malformed `package.json`
/// files, and resolution failures other than "module not found". A missing
/// module is not an error here; the resolver turns it into `None`.
///

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum WhichError {
    #[error("Failed to read manifest at {path}: {reason}")]
    #[diagnostic(code(node_which::manifest_read))]
    ManifestRead { path: PathBuf, reason: String },

    #[error("Failed to parse manifest at {path}: {reason}")]
    #[diagnostic(
        code(node_which::manifest_parse),
        help("fix the JSON syntax in this package.json")
    )]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Failed to resolve '{request}' from {from}: {reason}")]
    #[diagnostic(code(node_which::resolve))]
    Resolve {
        request: String,
        from: PathBuf,
        reason: String,
    },

    #[error("Start directory {path} is not usable: {reason}")]
    #[diagnostic(code(node_which::start_directory))]
    StartDirectory { path: PathBuf, reason: String },

    #[error("{0}")]
    #[diagnostic(code(node_which::io))]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(node_which::json))]
    Json(#[from] serde_json::Error),
}
