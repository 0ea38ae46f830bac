///
/// # Manifest Locator
///
/// Upward search for the nearest `package.json`.
///
/// `find_up()` walks from a starting point towards the filesystem root,
/// checking each directory for a file of the given name. An optional ceiling
/// bounds the walk: the ceiling directory itself is still checked, nothing
/// above it is. A start that is a file begins the walk at its parent, which is
/// how a resolved module path is turned into its owning package.
///
/// The ceiling is compared by path equality, so callers pass canonical paths
/// on both sides. A start outside the ceiling never meets it and the walk
/// runs to the root.
///

use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::WhichError;
use crate::manifest::{parse_manifest, PackageManifest, MANIFEST_FILE};

/// A parsed manifest together with the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedManifest {
    pub path: PathBuf,
    pub manifest: PackageManifest,
}

pub fn find_up(file_name: &str, from: &Path, ceiling: Option<&Path>) -> Option<PathBuf> {
    let mut current = if from.is_file() { from.parent()? } else { from };

    loop {
        let candidate = current.join(file_name);
        trace!(candidate = %candidate.display(), "checking");
        if candidate.is_file() {
            return Some(candidate);
        }

        if ceiling == Some(current) {
            return None;
        }

        current = current.parent()?;
    }
}

pub fn find_nearest_manifest(
    from: &Path,
    ceiling: Option<&Path>,
) -> Result<Option<LocatedManifest>, WhichError> {
    let Some(path) = find_up(MANIFEST_FILE, from, ceiling) else {
        return Ok(None);
    };

    let manifest = parse_manifest(&path)?;
    Ok(Some(LocatedManifest { path, manifest }))
}
