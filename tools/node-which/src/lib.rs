///
/// # node-which — Report where Node resolves a dependency from here
///
/// In a monorepo or a deep `node_modules` tree there can be several copies of
/// the same package. This crate answers which one `require()` would load from
/// a given directory, and which version that copy is.
///
/// ## Library Usage
///
/// ```rust,ignore
/// use node_which::{Outcome, Session};
///
/// let session = Session::new(&std::env::current_dir()?)?;
/// match session.lookup("react")? {
///     Outcome::Resolved(summary) => print!("{}", summary.render()),
///     Outcome::Unresolved(missing) => print!("{}", missing.render()),
/// }
/// ```
///
/// ## CLI
///
/// ```sh
/// node-which react              # resolve from the current directory
/// node-which react --from app/  # resolve from another directory
/// node-which react --json       # machine-readable summary
/// ```
///

pub mod errors;
pub mod locator;
pub mod manifest;
pub mod report;
pub mod resolver;
pub mod session;

pub use errors::WhichError;
pub use locator::{find_nearest_manifest, find_up, LocatedManifest};
pub use manifest::{PackageManifest, MANIFEST_FILE};
pub use report::{redact_home, Outcome, Summary, Unresolved};
pub use resolver::{
    global_paths_from_env, resolve_dependency, ModuleResolver, NodeResolver, ResolveFailure,
    Resolved, Strategy, Target,
};
pub use session::Session;
