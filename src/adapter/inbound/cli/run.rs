//! Plugin entry point: select the mode, run it, emit the result.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::error;

use super::command::{Cli, Invocation, CONFIG_MODE};
use super::protocol::SCHEMA;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::plugin::DiagnosticStream;
use crate::infrastructure::config::settings::Config;

/// Everything one invocation prints, assembled before any of it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Protocol output for stdout; empty on failure.
    pub stdout: String,
    /// One-line diagnostic and the stream it goes to.
    pub diagnostic: Option<(DiagnosticStream, String)>,
}

impl Outcome {
    fn output(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            diagnostic: None,
        }
    }

    fn failure(stream: DiagnosticStream, message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            diagnostic: Some((stream, message.into())),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Parse `args` (program name first), run the selected mode, emit its output.
///
/// `config` as the first argument selects the schema whatever follows it, so
/// clap never parses those arguments. Parse-level usage errors exit through
/// clap with its usage exit code.
pub async fn execute<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if is_schema_request(&args) {
        return finish(&run_schema());
    }

    let cli = Cli::parse_from(args);
    let invocation = match cli.invocation() {
        Ok(invocation) => invocation,
        Err(message) => Cli::command().error(ErrorKind::TooManyValues, message).exit(),
    };

    finish(&run(invocation, &cli.config_file).await)
}

/// True when the first argument after the program name is `config`.
fn is_schema_request(args: &[OsString]) -> bool {
    args.get(1).is_some_and(|arg| arg.as_os_str() == CONFIG_MODE)
}

fn finish(outcome: &Outcome) -> ExitCode {
    match emit(outcome) {
        Ok(()) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(()) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "failed to write plugin output");
            ExitCode::FAILURE
        }
    }
}

fn run_schema() -> Outcome {
    LoggingConfig::default().init();
    Outcome::output(SCHEMA)
}

/// Run one invocation without touching stdout.
pub async fn run(invocation: Invocation, config_file: &Path) -> Outcome {
    match invocation {
        Invocation::Schema => run_schema(),
        Invocation::Fetch { target } => fetch(&target, config_file).await,
    }
}

async fn fetch(target: &str, config_file: &Path) -> Outcome {
    let config = match Config::load(config_file) {
        Ok(config) => config,
        Err(e) => {
            LoggingConfig::default().init();
            error!(path = %config_file.display(), error = %e, "failed to load config");
            return Outcome::failure(DiagnosticStream::Stderr, e.to_string());
        }
    };
    config.init_logging();
    let stream = config.plugin.diagnostics;

    let dispatcher = match bootstrap::build_dispatcher(&config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!(error = %e, "failed to build dispatcher");
            return Outcome::failure(stream, e.to_string());
        }
    };

    match dispatcher.fetch(target).await {
        Ok(values) => Outcome::output(values),
        Err(e) => {
            error!(target, error = %e, "poll failed");
            Outcome::failure(stream, e.to_string())
        }
    }
}

/// Write the outcome: protocol output in a single write, then the diagnostic.
fn emit(outcome: &Outcome) -> io::Result<()> {
    if !outcome.stdout.is_empty() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(outcome.stdout.as_bytes())?;
        stdout.flush()?;
    }

    match &outcome.diagnostic {
        Some((DiagnosticStream::Stdout, message)) => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{message}")?;
            stdout.flush()
        }
        Some((DiagnosticStream::Stderr, message)) => writeln!(io::stderr().lock(), "{message}"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn config_first_is_schema_whatever_follows() {
        assert!(is_schema_request(&args(&["peakusage", "config"])));
        assert!(is_schema_request(&args(&["peakusage", "config", "--help"])));
        assert!(is_schema_request(&args(&["peakusage", "config", "-c"])));
        assert!(is_schema_request(&args(&["peakusage", "config", "-V", "x"])));
    }

    #[test]
    fn other_first_arguments_go_through_clap() {
        assert!(!is_schema_request(&args(&["peakusage"])));
        assert!(!is_schema_request(&args(&["peakusage", "appserver1"])));
        assert!(!is_schema_request(&args(&["peakusage", "-c", "p.toml", "config"])));
        assert!(!is_schema_request(&args(&["peakusage", "--help"])));
    }

    #[tokio::test]
    async fn schema_needs_no_config_file() {
        let outcome = run(Invocation::Schema, Path::new("/nonexistent/peakusage.toml")).await;

        assert_eq!(outcome, Outcome::output(SCHEMA));
    }

    #[tokio::test]
    async fn schema_output_is_stable() {
        let path = Path::new("/nonexistent/peakusage.toml");
        let first = run(Invocation::Schema, path).await;
        let second = run(Invocation::Schema, path).await;

        assert_eq!(first.stdout, second.stdout);
    }

    #[tokio::test]
    async fn missing_config_fails_on_stderr() {
        let outcome = run(
            Invocation::Fetch {
                target: "appserver1".into(),
            },
            Path::new("/nonexistent/peakusage.toml"),
        )
        .await;

        assert!(!outcome.is_success());
        assert!(outcome.stdout.is_empty());
        let (stream, message) = outcome.diagnostic.unwrap();
        assert_eq!(stream, DiagnosticStream::Stderr);
        assert!(message.contains("failed to read config file"));
    }

    #[tokio::test]
    async fn unknown_target_uses_configured_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peakusage.toml");
        fs::write(&path, "[plugin]\ndiagnostics = \"stdout\"\n").unwrap();

        let outcome = run(
            Invocation::Fetch {
                target: "appserver1".into(),
            },
            &path,
        )
        .await;

        assert!(outcome.stdout.is_empty());
        assert_eq!(
            outcome.diagnostic,
            Some((
                DiagnosticStream::Stdout,
                "unknown target 'appserver1'".to_string()
            ))
        );
    }
}
