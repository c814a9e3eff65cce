// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Global flags are declared with the derive API on [`CliArgs`]; one
//! subcommand per registered vendor is added at runtime, with flags declared
//! by the vendor itself.

use std::ffi::OsString;
use std::sync::Arc;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::errors::{Result, StarterpackError};
use crate::plugin::VendorPlugin;

const ABOUT: &str = "Use one of the following keywords to launch the DCC you want. \
To get more help, add '-h' or '--help' after the software name you want to start. \
Example: 'afterfx -h'.";

/// Global command-line arguments for `starterpack`.
#[derive(Debug, Clone, Parser)]
#[command(name = "starterpack", version, about = ABOUT, long_about = None)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WL_SP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Return as soon as the application has started instead of waiting for
    /// it to exit.
    #[arg(long, global = true)]
    pub detach: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// A parsed command line.
pub struct Invocation {
    pub args: CliArgs,
    /// `None` when no vendor was named.
    pub vendor: Option<VendorInvocation>,
}

/// The vendor subcommand and its own matches.
pub struct VendorInvocation {
    pub plugin: Arc<dyn VendorPlugin>,
    pub matches: ArgMatches,
}

/// Top-level command with one subcommand per plugin.
///
/// `plugins` must already have passed the CLI contract check.
pub fn build_command(plugins: &[Arc<dyn VendorPlugin>]) -> clap::Command {
    plugins
        .iter()
        .fold(CliArgs::command(), |command, plugin| match plugin.cli() {
            Some(cli) => command.subcommand(cli.register_cli(clap::Command::new(plugin.name()))),
            None => command,
        })
}

/// Parse the process arguments.
///
/// `--help`, `--version` and usage errors are handled by clap itself, which
/// prints and exits. An unknown vendor is returned as an error.
pub fn parse(plugins: &[Arc<dyn VendorPlugin>]) -> Result<Invocation> {
    parse_inner(plugins, std::env::args_os(), true)
}

/// Parse `argv` (program name first) without exiting on usage errors.
pub fn try_parse_from<I, T>(plugins: &[Arc<dyn VendorPlugin>], argv: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    parse_inner(plugins, argv, false)
}

fn parse_inner<I, T>(
    plugins: &[Arc<dyn VendorPlugin>],
    argv: I,
    exit_on_usage_error: bool,
) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(plugins)
        .try_get_matches_from(argv)
        .map_err(|e| map_clap_error(e, exit_on_usage_error))?;

    let args =
        CliArgs::from_arg_matches(&matches).map_err(|e| map_clap_error(e, exit_on_usage_error))?;

    let vendor = match matches.subcommand() {
        None => None,
        Some((name, sub_matches)) => {
            let plugin = plugins
                .iter()
                .find(|p| p.name() == name)
                .cloned()
                .ok_or_else(|| StarterpackError::UnknownVendor(name.to_string()))?;
            Some(VendorInvocation {
                plugin,
                matches: sub_matches.clone(),
            })
        }
    };

    Ok(Invocation { args, vendor })
}

fn map_clap_error(err: clap::Error, exit_on_usage_error: bool) -> StarterpackError {
    match err.kind() {
        ErrorKind::InvalidSubcommand => {
            StarterpackError::UnknownVendor(context_string(&err, ContextKind::InvalidSubcommand))
        }
        // With no vendor registered, a vendor name is just an unexpected
        // positional argument.
        ErrorKind::UnknownArgument
            if !context_string(&err, ContextKind::InvalidArg).starts_with('-') =>
        {
            StarterpackError::UnknownVendor(context_string(&err, ContextKind::InvalidArg))
        }
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ if exit_on_usage_error => err.exit(),
        _ => StarterpackError::InvalidArgument(err.to_string()),
    }
}

fn context_string(err: &clap::Error, kind: ContextKind) -> String {
    match err.get(kind) {
        Some(ContextValue::String(value)) => value.clone(),
        _ => String::new(),
    }
}
