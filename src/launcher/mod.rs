// src/launcher/mod.rs

//! The launcher abstraction shared by every vendor.
//!
//! A [`Launcher`] is built by a vendor factory from a [`LaunchContext`], turns
//! its options into a command, and owns the process it spawns.

pub mod args;
pub mod script_args;
pub mod supervised;

use std::fmt;
use std::sync::Arc;

use crate::config::ConfigResolver;
use crate::errors::Result;
use crate::exec::{OutputMode, ProcessSupervisor, ProcessTable, SupervisedProcess, SystemProcessTable};
use crate::fs::{FileSystem, RealFileSystem};

pub use args::{ArgValue, LaunchArgs};
pub use script_args::{ScriptArgs, parse_literal, parse_script_args};
pub use supervised::{CommandBuild, SupervisedLauncher};

/// What a call to [`Launcher::execute`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    Started { pid: Option<u32> },
    /// The duplicate-instance guard matched a running process.
    AlreadyRunning { name: String },
}

/// Capability every vendor launcher provides.
pub trait Launcher: Send {
    fn vendor(&self) -> &str;

    /// Build the command and spawn it without waiting for it to finish.
    fn execute(&mut self) -> Result<LaunchStatus>;

    /// The process started by the last successful `execute`, if any.
    fn process(&self) -> Option<&SupervisedProcess>;

    fn process_mut(&mut self) -> Option<&mut SupervisedProcess>;
}

impl dyn Launcher {
    /// Wait until the supervised process has exited.
    ///
    /// Returns immediately when nothing was started.
    pub async fn wait(&mut self) {
        if let Some(process) = self.process_mut() {
            process.wait().await;
        }
    }
}

/// Constructs a launcher for one vendor from untyped options.
pub type LauncherFactory =
    Arc<dyn Fn(&LaunchArgs, &LaunchContext) -> Result<Box<dyn Launcher>> + Send + Sync>;

/// Collaborators handed to every launcher factory.
#[derive(Clone)]
pub struct LaunchContext {
    pub fs: Arc<dyn FileSystem>,
    pub config: ConfigResolver,
    pub supervisor: ProcessSupervisor,
    pub process_table: Arc<dyn ProcessTable>,
}

impl fmt::Debug for LaunchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchContext")
            .field("fs", &self.fs)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LaunchContext {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        config: ConfigResolver,
        supervisor: ProcessSupervisor,
        process_table: Arc<dyn ProcessTable>,
    ) -> Self {
        Self {
            fs,
            config,
            supervisor,
            process_table,
        }
    }

    /// Production wiring: real disk, `WL_SP_CONFIG`, Tokio spawner and the
    /// live process table.
    pub fn from_env() -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        Self::new(
            Arc::clone(&fs),
            ConfigResolver::from_env(fs),
            ProcessSupervisor::default(),
            Arc::new(SystemProcessTable),
        )
    }

    /// Same collaborators, but children are started with their output
    /// detached so they survive the launcher exiting.
    pub fn detached(mut self) -> Self {
        self.supervisor = self.supervisor.with_output(OutputMode::Detached);
        self
    }
}
