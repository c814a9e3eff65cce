// src/vendors/afterfx/options.rs

use std::path::PathBuf;

use clap::ArgMatches;

use crate::errors::Result;
use crate::launcher::LaunchArgs;
use crate::vendors::afterfx::VENDOR_NAME;

/// Launch options of After Effects, before validation.
///
/// Validation (paths exist, flag combinations) happens when the command
/// builder is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AfterFxOptions {
    /// Path to the `AfterFX` binary.
    pub bin_path: Option<PathBuf>,
    /// Run without UI and quit once the script has been evaluated.
    pub no_gui: bool,
    /// `.js`/`.jsx` script evaluated at startup.
    pub script_path: Option<PathBuf>,
    /// Alternating key/value tokens exposed to the script as `scriptArgs`.
    pub script_args: Vec<String>,
    /// Configured software version; latest when unset.
    pub soft_version: Option<String>,
    /// Skip the launch when an instance is already running.
    pub single_instance: bool,
}

impl AfterFxOptions {
    pub const KNOWN_OPTIONS: &'static [&'static str] = &[
        "bin_path",
        "no_gui",
        "script_path",
        "script_args",
        "soft_version",
        "single_instance",
    ];

    pub fn from_launch_args(args: &LaunchArgs) -> Result<Self> {
        args.ensure_known(VENDOR_NAME, Self::KNOWN_OPTIONS)?;

        Ok(Self {
            bin_path: args.text("bin_path")?.map(PathBuf::from),
            no_gui: args.flag("no_gui")?,
            script_path: args.text("script_path")?.map(PathBuf::from),
            script_args: args.list("script_args")?.to_vec(),
            soft_version: args.text("soft_version")?.map(str::to_string),
            single_instance: args.flag("single_instance")?,
        })
    }

    /// Read the flags declared by [`super::cli`].
    pub fn from_arg_matches(matches: &ArgMatches) -> Self {
        Self {
            bin_path: matches.get_one::<PathBuf>("bin_path").cloned(),
            no_gui: matches.get_flag("no_gui"),
            script_path: matches.get_one::<PathBuf>("script_path").cloned(),
            script_args: matches
                .get_many::<String>("script_args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            soft_version: matches.get_one::<String>("soft_version").cloned(),
            single_instance: matches.get_flag("single_instance"),
        }
    }
}
