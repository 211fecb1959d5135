// src/cli.rs

//! Command-line surface for drover
//!
//! The action is a free token, not a clap subcommand: resolving it
//! against the registry (aliases, hyphen normalization, first-match
//! policy) is the pipeline's job. clap only decodes flags and collects
//! targets, and its built-in help/version flags are disabled because
//! `--help` and `--version` are mode switches owned by the core.

use clap::Parser;

use crate::config::Verbosity;
use crate::context::{ExpirationValue, OptionSet};

#[derive(Parser, Debug)]
#[command(name = "drover")]
#[command(author = "Drover Contributors")]
#[command(about = "Administrative CLI for fleet-wide package deployment", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Action name or alias (run 'drover help' for the list)
    pub action: Option<String>,

    /// Target packages, receipts, or file paths for the action
    pub targets: Vec<String>,

    /// Show usage instead of dispatching
    #[arg(long, short = 'H')]
    pub help: bool,

    /// Show the version banner
    #[arg(long)]
    pub version: bool,

    /// Less verbose output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// More verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Maximum verbosity (implies --verbose)
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Suppress the post-install reboot/logout notice
    #[arg(long = "no-puppy-notification", short = 'N')]
    pub no_puppy_notification: bool,

    /// Opt into pending-reboot ("puppy") handling
    #[arg(long, short = 'p')]
    pub puppies: bool,

    /// Bypass the backend availability cache
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Mark the installed package exempt from auto-update
    #[arg(long, short = 'F')]
    pub freeze: bool,

    /// Explicit operator attribution (overrides auto-resolution)
    #[arg(long, short = 'a', value_name = "NAME")]
    pub admin: Option<String>,

    /// Custom pilot expiration in days
    #[arg(long, short = 'e', value_name = "DAYS", allow_hyphen_values = true)]
    pub expiration: Option<String>,
}

impl Cli {
    /// The decoded option set the pipeline consumes
    pub fn options(&self) -> OptionSet {
        OptionSet {
            quiet: self.quiet,
            // --debug implies --verbose
            verbose: self.verbose || self.debug,
            debug: self.debug,
            puppies: self.puppies,
            no_puppy_notification: self.no_puppy_notification,
            force: self.force,
            freeze: self.freeze,
            admin: self.admin.clone(),
            expiration: self.expiration.clone().map(ExpirationValue::Raw),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose, self.debug)
    }
}
