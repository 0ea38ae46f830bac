///
/// node-which CLI
///
/// Prints where Node resolves a dependency from the current directory:
/// - node-which <dependency>: text summary, exit 0
/// - exit 1 with a diagnostic when neither the entrypoint nor the
///   package.json of the dependency can be resolved
/// - exit 1 when no dependency name is given
///
/// Set RUST_LOG=debug to trace each resolution step on stderr.
///

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use node_which::{redact_home, Outcome, Session, WhichError};

#[derive(Parser)]
#[command(name = "node-which")]
#[command(author, version, about = "Show which copy of a dependency Node resolves", long_about = None)]
struct Cli {
    /// The dependency name, as passed to require()
    #[arg(value_name = "DEPENDENCY")]
    dependency: Option<String>,

    /// Resolve from this directory instead of the current one
    #[arg(long, value_name = "DIR")]
    from: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> miette::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let Some(dependency) = cli.dependency.filter(|name| !name.is_empty()) else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "a dependency name is required")
            .print()
            .map_err(WhichError::from)?;
        return Ok(ExitCode::FAILURE);
    };

    let cwd = std::env::current_dir().map_err(WhichError::from)?;
    let resolve_from = match cli.from {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    let session = Session::new(&resolve_from)?;

    match session.lookup(&dependency)? {
        Outcome::Unresolved(missing) => {
            print!("{}", missing.render());
            Ok(ExitCode::FAILURE)
        }
        Outcome::Resolved(summary) => {
            let text = if cli.json {
                summary.render_json()? + "\n"
            } else {
                summary.render()
            };
            print!("{}", redact_home(&text, dirs::home_dir().as_deref()));
            Ok(ExitCode::SUCCESS)
        }
    }
}
