// src/vendors/afterfx/cli.rs

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::errors::Result;
use crate::launcher::{LaunchContext, Launcher};
use crate::plugin::VendorCli;
use crate::vendors::afterfx::{AfterFx, AfterFxOptions, create_launcher};

impl VendorCli for AfterFx {
    fn register_cli(&self, command: Command) -> Command {
        command
            .about("Launch Adobe After Effects, optionally running a script at startup.")
            .arg(
                Arg::new("bin_path")
                    .long("bin-path")
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("Path to the application binary."),
            )
            .arg(
                Arg::new("no_gui")
                    .long("no-gui")
                    .action(ArgAction::SetTrue)
                    .help("Run without UI and quit after the script. Requires --script-path."),
            )
            .arg(
                Arg::new("script_path")
                    .long("script-path")
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("A .js/.jsx script to execute at startup."),
            )
            .arg(
                Arg::new("script_args")
                    .long("script-args")
                    .value_name("KEY VALUE")
                    .num_args(1..)
                    .allow_negative_numbers(true)
                    .action(ArgAction::Append)
                    .help("Key/value pairs exposed to the script as `scriptArgs`."),
            )
            .arg(
                Arg::new("soft_version")
                    .long("soft-version")
                    .value_name("VERSION")
                    .help("Configured version to use. Defaults to the latest one."),
            )
            .arg(
                Arg::new("single_instance")
                    .long("single-instance")
                    .action(ArgAction::SetTrue)
                    .help("Do nothing if After Effects is already running."),
            )
    }

    fn execute(&self, matches: &ArgMatches, ctx: &LaunchContext) -> Result<Box<dyn Launcher>> {
        let options = AfterFxOptions::from_arg_matches(matches);
        let mut launcher = create_launcher(&options, ctx)?;
        launcher.execute()?;
        Ok(Box::new(launcher))
    }
}
