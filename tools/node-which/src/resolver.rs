///
/// # Dependency Resolution
///
/// Answers "which file does `require(name)` load from here?" by trying an
/// ordered list of strategies against a module resolution primitive:
///
/// 1. **Main**: the package name itself, which follows `exports["."]` or
///    `main`, falling back to `index.js`.
/// 2. **Manifest**: `<name>/package.json`. This only works for packages that
///    have no `exports` map or whose map exposes the manifest.
///
/// The first strategy to produce a target wins. A "not found" from the
/// primitive moves on to the next strategy; any other failure aborts the
/// whole lookup.
///
/// The primitive sits behind the `ModuleResolver` trait. `NodeResolver` is the
/// production implementation, backed by `oxc_resolver` and configured for
/// CommonJS `require` under Node. On top of the `node_modules` walk it knows
/// the parts of Node's loader that `oxc_resolver` leaves out:
///
/// - core modules (`fs`, `node:fs`) resolve to their own id;
/// - a package whose `main` names a missing file is an error, not a miss;
/// - `NODE_PATH` entries and `~/.node_modules`, `~/.node_libraries` are
///   searched after every `node_modules` directory.
///

use oxc_resolver::{ResolveError, ResolveOptions, Resolver};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::WhichError;
use crate::manifest::{parse_manifest, MANIFEST_FILE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The requested module does not exist anywhere the primitive looked.
    NotFound { request: String },
    Other { reason: String },
}

/// What a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    /// A core module, reported by the id it was requested with.
    Builtin(String),
}

impl Target {
    pub fn path(&self) -> PathBuf {
        match self {
            Target::File(path) => path.clone(),
            Target::Builtin(id) => PathBuf::from(id),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Target::Builtin(_))
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Target::File(path)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::File(path) => write!(f, "{}", path.display()),
            Target::Builtin(id) => write!(f, "{}", id),
        }
    }
}

pub trait ModuleResolver {
    fn resolve(&self, directory: &Path, request: &str) -> Result<Target, ResolveFailure>;
}

pub struct NodeResolver {
    resolver: Resolver,
    global_paths: Vec<PathBuf>,
}

impl NodeResolver {
    pub fn new() -> Self {
        Self::with_global_paths(global_paths_from_env())
    }

    pub fn with_global_paths(global_paths: Vec<PathBuf>) -> Self {
        let options = ResolveOptions {
            extensions: vec![".js".into(), ".json".into(), ".node".into()],
            condition_names: vec!["node".into(), "require".into()],
            main_fields: vec!["main".into()],
            main_files: vec!["index".into()],
            builtin_modules: true,
            ..ResolveOptions::default()
        };

        Self {
            resolver: Resolver::new(options),
            global_paths,
        }
    }

    pub fn global_paths(&self) -> &[PathBuf] {
        &self.global_paths
    }

    /// Bare requests that missed every `node_modules` directory get one more
    /// try in the global folders, in order.
    fn resolve_global(&self, request: &str) -> Result<Target, ResolveFailure> {
        if package_name(request).is_some() {
            let relative = format!("./{}", request);
            for dir in self.global_paths.iter().filter(|dir| dir.is_dir()) {
                debug!(dir = %dir.display(), %request, "trying global folder");
                match self.resolver.resolve(dir, &relative) {
                    Ok(resolution) => return Ok(Target::File(resolution.path().to_path_buf())),
                    Err(ResolveError::NotFound(_)) => continue,
                    Err(other) => {
                        return Err(ResolveFailure::Other {
                            reason: other.to_string(),
                        })
                    }
                }
            }
        }

        Err(ResolveFailure::NotFound {
            request: request.to_string(),
        })
    }
}

impl Default for NodeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleResolver for NodeResolver {
    fn resolve(&self, directory: &Path, request: &str) -> Result<Target, ResolveFailure> {
        match self.resolver.resolve(directory, request) {
            Ok(resolution) => Ok(Target::File(resolution.path().to_path_buf())),
            Err(ResolveError::Builtin { .. }) => Ok(Target::Builtin(request.to_string())),
            Err(error) => match classify(&error, directory, request) {
                ResolveFailure::NotFound { .. } => self.resolve_global(request),
                failure => Err(failure),
            },
        }
    }
}

/// `NODE_PATH` entries, then `~/.node_modules` and `~/.node_libraries`.
/// Relative `NODE_PATH` entries are skipped.
pub fn global_paths_from_env() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = std::env::var_os("NODE_PATH")
        .map(|raw| {
            std::env::split_paths(&raw)
                .filter(|path| path.is_absolute())
                .collect()
        })
        .unwrap_or_default();

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".node_modules"));
        paths.push(home.join(".node_libraries"));
    }

    paths
}

/// The only place that decides whether a resolver error means "not found".
///
/// A not-found for some other request is a real failure. So is a miss on a
/// package that is installed but whose `main` points nowhere: Node refuses
/// to load it rather than looking elsewhere.
fn classify(error: &ResolveError, directory: &Path, request: &str) -> ResolveFailure {
    match error {
        ResolveError::NotFound(missing) if missing == request => {
            match broken_main(directory, request) {
                Some(reason) => ResolveFailure::Other { reason },
                None => ResolveFailure::NotFound {
                    request: request.to_string(),
                },
            }
        }
        other => ResolveFailure::Other {
            reason: other.to_string(),
        },
    }
}

/// The package part of a bare request: `lodash/fp` -> `lodash`,
/// `@scope/pkg/x` -> `@scope/pkg`. `None` for relative and absolute requests.
fn package_name(request: &str) -> Option<&str> {
    if request.is_empty() || request.starts_with('.') || request.starts_with('/') {
        return None;
    }

    let mut parts = request.splitn(3, '/');
    let first = parts.next()?;
    if first.starts_with('@') {
        let second = parts.next().filter(|s| !s.is_empty())?;
        Some(&request[..first.len() + 1 + second.len()])
    } else {
        Some(first)
    }
}

/// Node's message for an installed package whose `main` did not resolve,
/// when `request` names that package and nothing more.
fn broken_main(directory: &Path, request: &str) -> Option<String> {
    if package_name(request)? != request {
        return None;
    }

    let package_dir = directory
        .ancestors()
        .map(|dir| dir.join("node_modules").join(request))
        .find(|dir| dir.join(MANIFEST_FILE).is_file())?;

    let manifest = parse_manifest(&package_dir.join(MANIFEST_FILE)).ok()?;
    if manifest.exports.is_some() {
        return None;
    }
    let main = manifest.main.filter(|main| !main.is_empty())?;

    Some(format!(
        "Cannot find module '{}'. Please verify that the package.json has a valid \"main\" entry",
        package_dir.join(main).display()
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Main,
    Manifest,
}

impl Strategy {
    pub const ORDER: [Strategy; 2] = [Strategy::Main, Strategy::Manifest];

    pub fn request(self, dependency: &str) -> String {
        match self {
            Strategy::Main => dependency.to_string(),
            Strategy::Manifest => format!("{}/{}", dependency, MANIFEST_FILE),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Strategy::Main => "the default entrypoint ('.' or main)",
            Strategy::Manifest => "the package.json",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Main => write!(f, "main"),
            Strategy::Manifest => write!(f, "manifest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub target: Target,
    pub strategy: Strategy,
}

pub fn try_strategy<R: ModuleResolver + ?Sized>(
    resolver: &R,
    strategy: Strategy,
    dependency: &str,
    from: &Path,
) -> Result<Option<Target>, WhichError> {
    let request = strategy.request(dependency);
    debug!(%strategy, %request, from = %from.display(), "resolving");

    match resolver.resolve(from, &request) {
        Ok(target) => Ok(Some(target)),
        Err(ResolveFailure::NotFound { .. }) => {
            debug!(%strategy, %request, "not found");
            Ok(None)
        }
        Err(ResolveFailure::Other { reason }) => Err(WhichError::Resolve {
            request,
            from: from.to_path_buf(),
            reason,
        }),
    }
}

pub fn resolve_dependency<R: ModuleResolver + ?Sized>(
    resolver: &R,
    dependency: &str,
    from: &Path,
) -> Result<Option<Resolved>, WhichError> {
    for strategy in Strategy::ORDER {
        if let Some(target) = try_strategy(resolver, strategy, dependency, from)? {
            debug!(%strategy, %target, "resolved");
            return Ok(Some(Resolved { target, strategy }));
        }
    }

    Ok(None)
}
