// src/vendors/afterfx/command_builder.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ResolvedConfig;
use crate::errors::{Result, StarterpackError};
use crate::exec::LaunchCommand;
use crate::fs::FileSystem;
use crate::launcher::{CommandBuild, ScriptArgs, parse_script_args};
use crate::vendors::afterfx::{AFTERFX_BIN_ENV, AfterFxOptions, SCRIPT_EXTENSIONS};

/// Switch for running without UI.
pub const NO_UI_FLAG: &str = "-noui";

/// Switch followed by the inline script payload.
pub const SCRIPT_FLAG: &str = "-s";

/// Name of the variable holding the decoded script arguments.
pub const SCRIPT_ARGS_VAR: &str = "scriptArgs";

/// Defines `readJsonString`; ExtendScript engines without a native `JSON`
/// object fall back to evaluating the literal.
pub const JSON_READER_SNIPPET: &str = "function readJsonString(s){return (typeof JSON!=='undefined')?JSON.parse(s):eval('('+s+')');}";

/// Setting of the active software version consulted for the binary.
pub const BIN_PATH_SETTING: &str = "bin_path";

/// Builds the After Effects command line from validated options.
#[derive(Debug, Clone, PartialEq)]
pub struct AfterFxCommandBuilder {
    bin_path: String,
    no_gui: bool,
    script_path: Option<String>,
    script_args: Option<ScriptArgs>,
}

impl AfterFxCommandBuilder {
    /// Validate `options` against the disk and the resolved configuration.
    ///
    /// The binary comes from `--bin-path`, then `WL_SP_AFTERFX_BIN`, then the
    /// `bin_path` setting of the active version, and must exist.
    pub fn new(fs: &dyn FileSystem, options: &AfterFxOptions, resolved: &ResolvedConfig) -> Result<Self> {
        let bin_path = options
            .bin_path
            .clone()
            .or_else(|| resolved.env.lookup(AFTERFX_BIN_ENV).map(PathBuf::from))
            .or_else(|| resolved.setting_str(BIN_PATH_SETTING).map(PathBuf::from));

        let bin_path = match bin_path {
            Some(path) if fs.exists(&path) => path,
            _ => {
                return Err(StarterpackError::MissingResource(format!(
                    "you should provide a valid path for the AfterFX binary: either through \
                     --bin-path or through the env var {AFTERFX_BIN_ENV}"
                )));
            }
        };

        if options.no_gui && options.script_path.is_none() {
            return Err(StarterpackError::InvalidArgument(
                "AfterFX cannot run in no-gui mode without a script to execute".to_string(),
            ));
        }

        if !options.script_args.is_empty() && options.script_path.is_none() {
            return Err(StarterpackError::InvalidArgument(
                "script arguments were given without a script to execute".to_string(),
            ));
        }

        if let Some(script) = &options.script_path {
            validate_script(fs, script)?;
        }

        let script_args = if options.script_args.is_empty() {
            None
        } else {
            Some(parse_script_args(&options.script_args)?)
        };

        let builder = Self {
            bin_path: bin_path.to_string_lossy().into_owned(),
            no_gui: options.no_gui,
            script_path: options
                .script_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            script_args,
        };

        info!(
            bin = %builder.bin_path,
            no_gui = builder.no_gui,
            script = ?builder.script_path,
            "AfterFX command builder ready"
        );
        Ok(builder)
    }

    pub fn bin_path(&self) -> &str {
        &self.bin_path
    }

    pub fn script_args(&self) -> Option<&ScriptArgs> {
        self.script_args.as_ref()
    }

    /// The single argument passed after `-s`.
    ///
    /// Fragments are concatenated without separator; each one already ends
    /// with `;`.
    fn inline_script(&self, script_path: &str) -> Result<String> {
        let mut payload = String::new();

        if let Some(args) = self.script_args.as_ref().filter(|a| !a.is_empty()) {
            let json = serde_json::to_string(args).map_err(anyhow::Error::from)?;
            payload.push_str(JSON_READER_SNIPPET);
            payload.push_str(&format!(
                "var {SCRIPT_ARGS_VAR}=readJsonString('{}');",
                escape_single_quoted(&json)
            ));
        }

        payload.push_str(&format!("app.exitAfterLaunchAndEval={};", self.no_gui));

        let script_path = script_path.replace('\\', "/");
        payload.push_str(&format!("$.evalFile('{}');", escape_single_quoted(&script_path)));

        Ok(payload)
    }
}

impl CommandBuild for AfterFxCommandBuilder {
    fn build(&self) -> Result<LaunchCommand> {
        debug!(builder = ?self, "building AfterFX command");

        let mut command = LaunchCommand::new(&self.bin_path).arg_if(self.no_gui, NO_UI_FLAG);

        if let Some(script_path) = &self.script_path {
            command = command
                .arg(SCRIPT_FLAG)
                .arg(self.inline_script(script_path)?);
        }

        Ok(command)
    }
}

fn validate_script(fs: &dyn FileSystem, script: &Path) -> Result<()> {
    if !fs.is_file(script) {
        return Err(StarterpackError::MissingResource(format!(
            "you should provide a valid path for the AfterFX script to execute (got {})",
            script.display()
        )));
    }

    let extension_ok = script
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCRIPT_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)));
    if !extension_ok {
        return Err(StarterpackError::MissingResource(format!(
            "the AfterFX script {} should have one of the extensions: {}",
            script.display(),
            SCRIPT_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(())
}

/// Escape `raw` for use inside a single-quoted script string literal.
pub fn escape_single_quoted(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            // Line terminators inside string literals for older script engines.
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            other => escaped.push(other),
        }
    }
    escaped
}
