//! Command-line definition.

use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::config::settings::DEFAULT_CONFIG_PATH;

/// Token selecting declare-schema mode.
pub const CONFIG_MODE: &str = "config";

/// Munin plugin reporting peak usage of the JVM tenured-generation pool.
#[derive(Parser, Debug)]
#[command(name = "peakusage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// `config` to print the graph definition, otherwise the target to poll
    pub mode: String,

    /// Extra arguments, ignored after `config`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub extra: Vec<String>,

    /// Path to configuration file
    #[arg(
        short,
        long = "config-file",
        env = "PEAKUSAGE_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config_file: PathBuf,
}

/// What one plugin invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print the graph schema.
    Schema,
    /// Poll the named target.
    Fetch { target: String },
}

impl Invocation {
    /// Select the protocol mode from the positional arguments.
    ///
    /// # Errors
    ///
    /// Returns a usage message when a target is followed by extra arguments.
    pub fn from_args(mode: &str, extra: &[String]) -> Result<Self, String> {
        if mode == CONFIG_MODE {
            return Ok(Self::Schema);
        }
        if !extra.is_empty() {
            return Err(format!(
                "expected exactly one target, got {} arguments",
                extra.len() + 1
            ));
        }
        Ok(Self::Fetch {
            target: mode.to_string(),
        })
    }
}

impl Cli {
    /// The invocation requested by these arguments.
    ///
    /// # Errors
    ///
    /// See [`Invocation::from_args`].
    pub fn invocation(&self) -> Result<Invocation, String> {
        Invocation::from_args(&self.mode, &self.extra)
    }
}
