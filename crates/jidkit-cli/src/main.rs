mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use jidkit_core::{PrepProfile, Stringprep};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{addresses, compare, sort, Context};
use crate::error::{exit_code_for, report_error};
use jidkit_config as config;

#[derive(Debug, Parser)]
#[command(name = "jidkit", version, about = "XMPP address toolkit")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Stringprep profile to use instead of the configured one
    #[arg(long, global = true)]
    stringprep: Option<PrepProfile>,
    /// Treat input as already normalized and skip stringprep
    #[arg(long, global = true)]
    trusted: bool,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of each address
    Parse(addresses::ParseArgs),
    /// Print the bare form of each address
    Bare(addresses::BareArgs),
    /// Replace the resource of an address
    Resource(addresses::ResourceArgs),
    /// Compare two addresses by canonical form
    Compare(compare::CompareArgs),
    /// Sort and de-duplicate addresses
    Sort(sort::SortArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        stringprep,
        trusted,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => debug!(path = %path.display(), "config resolved"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let profile = stringprep.unwrap_or(app_config.stringprep);
    let prep = profile.build();
    let cache = app_config.cache(&prep);
    debug!(
        stringprep = prep.name(),
        trusted,
        cache = cache.is_some(),
        "stringprep selected"
    );

    let ctx = Context {
        prep: &prep,
        cache: cache.as_ref(),
        json,
        trusted,
    };

    match command {
        Command::Parse(args) => addresses::parse(&ctx, args),
        Command::Bare(args) => addresses::bare(&ctx, args),
        Command::Resource(args) => addresses::replace_resource(&ctx, args),
        Command::Compare(args) => compare::compare(&ctx, args),
        Command::Sort(args) => sort::sort(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
