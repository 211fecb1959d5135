// src/config.rs

//! Process-scoped runtime configuration
//!
//! One `Config` is built at startup and passed by reference to every
//! component; there is no global mutable state. Fixed defaults are
//! overlaid with an optional TOML file, since the agent path and server
//! URL are deployment-specific.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_SUPPORT_DIR: &str = "/var/lib/drover";
pub const DEFAULT_AGENT_PATH: &str = "/usr/local/sbin/fleet-agent";
pub const DEFAULT_LOG_PATH: &str = "/var/log/drover.log";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/drover/config.toml";

/// Owner rwx, group/other rx on the support directory
pub const SUPPORT_DIR_MODE: u32 = 0o755;

/// Logging threshold, computed once from the command-line flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// `--debug` wins over `--verbose` wins over `--quiet`
    pub fn from_flags(quiet: bool, verbose: bool, debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    /// Default tracing directive when RUST_LOG is unset
    pub fn level_str(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Debug => "trace",
        }
    }
}

/// Runtime configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Support directory kept present with fixed permissions on elevated runs
    pub support_dir: PathBuf,
    /// The local management agent binary every backend operation shells to
    pub agent_path: PathBuf,
    /// Diagnostic failure log
    pub log_path: PathBuf,
    /// Depot server override, exported to the agent environment
    pub server_url: Option<String>,
    pub verbosity: Verbosity,
}

/// Optional overlay file; only named keys override the defaults
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    support_dir: Option<PathBuf>,
    agent_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    server_url: Option<String>,
}

impl Config {
    /// Build the configuration from defaults plus the overlay file at
    /// `DROVER_CONFIG` (or the fixed default path).
    pub fn load(verbosity: Verbosity) -> Result<Self> {
        let path = env::var("DROVER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path, verbosity)
    }

    /// Same, from an explicit overlay path. A missing file is not an
    /// error; a malformed one is.
    pub fn load_from(path: &Path, verbosity: Verbosity) -> Result<Self> {
        let overlay = if path.exists() {
            let text = fs::read_to_string(path)?;
            toml::from_str::<ConfigFile>(&text)
                .map_err(|err| Error::Config(format!("{}: {}", path.display(), err)))?
        } else {
            ConfigFile::default()
        };

        Ok(Config {
            support_dir: overlay.support_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SUPPORT_DIR)),
            agent_path: overlay.agent_path.unwrap_or_else(|| PathBuf::from(DEFAULT_AGENT_PATH)),
            log_path: overlay.log_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
            server_url: overlay.server_url,
            verbosity,
        })
    }
}
