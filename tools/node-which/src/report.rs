///
/// # Report Rendering
///
/// Turns a lookup outcome into what the user sees: the resolution summary,
/// the "could not find" diagnostic, or a JSON object for scripts. Home
/// directory redaction is applied last, to whichever text was produced.
///

use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::errors::WhichError;
use crate::manifest::PackageManifest;
use crate::resolver::Strategy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub dependency: String,
    pub path: PathBuf,
    /// `path` is a core module id rather than a file.
    pub builtin: bool,
    pub strategy: Strategy,
    pub version: Option<String>,
    pub owner: Option<PackageManifest>,
    pub from: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    pub dependency: String,
    pub from: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(Summary),
    Unresolved(Unresolved),
}

impl Summary {
    pub fn version_line(&self) -> Option<String> {
        self.version.as_ref().map(|v| format!("which is @ {}", v))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "  Node resolves {}", self.dependency);
        let _ = writeln!(out, "       to   {}", self.path.display());
        if let Some(line) = self.version_line() {
            let _ = writeln!(out, "       {}", line);
        }
        let _ = writeln!(out);

        let owner = match &self.owner {
            Some(manifest) => manifest.label(),
            None => "(no package.json)".to_string(),
        };
        let _ = writeln!(out, "     from   {}", owner);
        let _ = writeln!(out, "       at   {}", self.from.display());
        out
    }

    pub fn render_json(&self) -> Result<String, WhichError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Unresolved {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "  Could not find {}", self.dependency);
        let _ = writeln!(out);
        let _ = writeln!(out, "  Tried require.resolve of {} using:", self.dependency);
        for strategy in Strategy::ORDER {
            let _ = writeln!(out, "    - {}", strategy.describe());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "  from: {}", self.from.display());
        let _ = writeln!(out);
        let _ = writeln!(out, "  To spot check, run:");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "    node -e \"console.log(require.resolve('{}'))\"",
            self.dependency
        );
        out
    }
}

/// Replace every occurrence of the home directory with `~`.
///
/// A missing, empty or root home is left alone; replacing `/` would mangle
/// every path in the text.
pub fn redact_home(text: &str, home: Option<&Path>) -> String {
    let Some(home) = home.and_then(Path::to_str) else {
        return text.to_string();
    };

    let home = home.trim_end_matches('/');
    if home.is_empty() {
        return text.to_string();
    }

    text.replace(home, "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(version: Option<&str>) -> Summary {
        Summary {
            dependency: "x".to_string(),
            path: PathBuf::from("/home/alice/proj/node_modules/x/index.js"),
            builtin: false,
            strategy: Strategy::Main,
            version: version.map(str::to_string),
            owner: Some(PackageManifest {
                name: Some("proj".to_string()),
                version: Some("0.1.0".to_string()),
                ..PackageManifest::default()
            }),
            from: PathBuf::from("/home/alice/proj"),
        }
    }

    #[test]
    fn test_summary_includes_version() {
        let text = summary(Some("2.3.1")).render();

        assert_eq!(
            text,
            "\n  Node resolves x\n       to   /home/alice/proj/node_modules/x/index.js\n       which is @ 2.3.1\n\n     from   proj @ 0.1.0\n       at   /home/alice/proj\n"
        );
    }

    #[test]
    fn test_summary_without_version_or_owner() {
        let mut summary = summary(None);
        summary.owner = None;
        let text = summary.render();

        assert!(!text.contains("which is @"));
        assert!(text.contains("from   (no package.json)"));
    }

    #[test]
    fn test_unresolved_names_dependency_and_strategies() {
        let text = Unresolved {
            dependency: "ghost".to_string(),
            from: PathBuf::from("/work/app"),
        }
        .render();

        assert!(text.contains("Could not find ghost"));
        assert!(text.contains("- the default entrypoint ('.' or main)"));
        assert!(text.contains("- the package.json"));
        assert!(text.contains("from: /work/app"));
        assert!(text.contains(r#"node -e "console.log(require.resolve('ghost'))""#));
    }

    #[test]
    fn test_redact_home() {
        let text = summary(Some("2.3.1")).render();
        let redacted = redact_home(&text, Some(Path::new("/home/alice")));

        assert!(redacted.contains("to   ~/proj/node_modules/x/index.js"));
        assert!(redacted.contains("at   ~/proj"));
        assert!(!redacted.contains("/home/alice"));
    }

    #[test]
    fn test_redact_home_ignores_root_and_missing() {
        assert_eq!(redact_home("/usr/lib/x", Some(Path::new("/"))), "/usr/lib/x");
        assert_eq!(redact_home("/usr/lib/x", None), "/usr/lib/x");
    }

    #[test]
    fn test_summary_json_shape() {
        insta::assert_json_snapshot!(summary(Some("2.3.1")), @r#"
        {
          "dependency": "x",
          "path": "/home/alice/proj/node_modules/x/index.js",
          "builtin": false,
          "strategy": "main",
          "version": "2.3.1",
          "owner": {
            "name": "proj",
            "version": "0.1.0"
          },
          "from": "/home/alice/proj"
        }
        "#);
    }
}
