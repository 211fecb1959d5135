// src/main.rs

use std::process::ExitCode;

use clap::Parser;
use nix::unistd::Uid;
use tracing::error;

use drover::backend::AgentBackend;
use drover::cli::Cli;
use drover::config::Config;
use drover::session::Session;
use drover::{Error, RequestContext};
use drover::{dispatch, help, logging, registry, validate};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    logging::init(verbosity);

    let config = match Config::load(verbosity) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logging::log_failure(&config, &err);
            error!("{}: {}", err.kind(), err);
            eprintln!("{}", err);
            if matches!(err, Error::UnknownAction(_)) {
                help::print_usage();
            }
            ExitCode::FAILURE
        }
    }
}

/// Resolve, validate, and dispatch one action. The session created here
/// drops on every return path, tearing down any server connection.
fn run(cli: &Cli, config: &Config) -> drover::Result<()> {
    if cli.version {
        help::print_version();
        return Ok(());
    }
    if cli.help {
        help::print_usage();
        return Ok(());
    }
    let Some(raw) = cli.action.as_deref() else {
        help::print_usage();
        return Ok(());
    };

    let spec = registry::resolve(raw)?;
    let mut ctx = RequestContext::new(spec, cli.options(), cli.targets.clone());
    let mut session = Session::new(Box::new(AgentBackend::new(config)));
    validate::run_checks(&mut ctx, config, &mut session, Uid::effective().is_root())?;
    dispatch::dispatch(&ctx, &mut session)
}
