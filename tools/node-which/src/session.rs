///
/// # Lookup Session
///
/// One `Session` answers one "where does this dependency come from?" question
/// for a fixed start directory. It owns the resolver and a single memo slot
/// for the invoking project's own manifest, so repeated lookups in the same
/// process (tests, mostly) never share state.
///
/// ## Version lookup
///
/// The version of a resolved dependency comes from the nearest `package.json`
/// above the resolved file, searching no higher than the start directory. If
/// that manifest carries the invoking project's own name, the search walked
/// out of the dependency and into the caller, so no version is reported.
///

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::WhichError;
use crate::locator::{find_nearest_manifest, LocatedManifest};
use crate::report::{Outcome, Summary, Unresolved};
use crate::resolver::{resolve_dependency, ModuleResolver, NodeResolver, Target};

pub struct Session<R = NodeResolver> {
    resolve_from: PathBuf,
    resolver: R,
    self_manifest: OnceCell<Option<LocatedManifest>>,
}

impl Session<NodeResolver> {
    pub fn new(resolve_from: &Path) -> Result<Self, WhichError> {
        Self::with_resolver(resolve_from, NodeResolver::new())
    }
}

impl<R: ModuleResolver> Session<R> {
    /// The start directory is canonicalized so that it compares equal to the
    /// real paths the resolver hands back.
    pub fn with_resolver(resolve_from: &Path, resolver: R) -> Result<Self, WhichError> {
        let resolve_from =
            resolve_from
                .canonicalize()
                .map_err(|e| WhichError::StartDirectory {
                    path: resolve_from.to_path_buf(),
                    reason: e.to_string(),
                })?;

        if !resolve_from.is_dir() {
            return Err(WhichError::StartDirectory {
                path: resolve_from,
                reason: "not a directory".to_string(),
            });
        }

        Ok(Self {
            resolve_from,
            resolver,
            self_manifest: OnceCell::new(),
        })
    }

    pub fn resolve_from(&self) -> &Path {
        &self.resolve_from
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The invoking project's nearest manifest, searched without a ceiling.
    /// Loaded on first use and reused for the rest of the session.
    pub fn self_manifest(&self) -> Result<Option<&LocatedManifest>, WhichError> {
        if let Some(cached) = self.self_manifest.get() {
            return Ok(cached.as_ref());
        }

        let located = find_nearest_manifest(&self.resolve_from, None)?;
        if let Some(found) = &located {
            debug!(path = %found.path.display(), "self manifest");
        }
        Ok(self.self_manifest.get_or_init(|| located).as_ref())
    }

    pub fn version_at(&self, path_of_dep: &Path) -> Result<Option<String>, WhichError> {
        let Some(dep) = find_nearest_manifest(path_of_dep, Some(&self.resolve_from))? else {
            debug!(path = %path_of_dep.display(), "no manifest below start directory");
            return Ok(None);
        };

        if let Some(own) = self.self_manifest()? {
            if own.manifest.name == dep.manifest.name {
                debug!(
                    path = %dep.path.display(),
                    "manifest belongs to the invoking project, ignoring"
                );
                return Ok(None);
            }
        }

        Ok(dep.manifest.version)
    }

    pub fn lookup(&self, dependency: &str) -> Result<Outcome, WhichError> {
        let Some(resolved) = resolve_dependency(&self.resolver, dependency, &self.resolve_from)?
        else {
            return Ok(Outcome::Unresolved(Unresolved {
                dependency: dependency.to_string(),
                from: self.resolve_from.clone(),
            }));
        };

        let version = match &resolved.target {
            Target::File(path) => self.version_at(path)?,
            Target::Builtin(_) => None,
        };
        let owner = self.self_manifest()?.map(|own| own.manifest.clone());

        Ok(Outcome::Resolved(Summary {
            dependency: dependency.to_string(),
            path: resolved.target.path(),
            builtin: resolved.target.is_builtin(),
            strategy: resolved.strategy,
            version,
            owner,
            from: self.resolve_from.clone(),
        }))
    }
}
