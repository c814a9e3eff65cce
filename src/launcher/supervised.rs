// src/launcher/supervised.rs

use tracing::debug;

use crate::config::ResolvedEnvironment;
use crate::errors::Result;
use crate::exec::{InstanceProbe, LaunchCommand, ProcessSupervisor, SpawnOutcome, SupervisedProcess};
use crate::launcher::{LaunchStatus, Launcher};

/// Produces the command line of one vendor from already validated options.
pub trait CommandBuild: Send {
    fn build(&self) -> Result<LaunchCommand>;
}

/// Generic launcher: build with `B`, spawn through the supervisor, keep the
/// process handle.
///
/// Environment resolution has fully completed before this value exists, and
/// `execute` finishes building before it spawns.
pub struct SupervisedLauncher<B> {
    vendor: String,
    builder: B,
    env: ResolvedEnvironment,
    supervisor: ProcessSupervisor,
    guard: Option<Box<dyn InstanceProbe>>,
    process: Option<SupervisedProcess>,
}

impl<B: CommandBuild> SupervisedLauncher<B> {
    pub fn new(
        vendor: impl Into<String>,
        builder: B,
        env: ResolvedEnvironment,
        supervisor: ProcessSupervisor,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            builder,
            env,
            supervisor,
            guard: None,
            process: None,
        }
    }

    /// Enable the duplicate-instance guard.
    pub fn with_guard(mut self, guard: Box<dyn InstanceProbe>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn env(&self) -> &ResolvedEnvironment {
        &self.env
    }
}

impl<B: CommandBuild> Launcher for SupervisedLauncher<B> {
    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn execute(&mut self) -> Result<LaunchStatus> {
        let command = self.builder.build()?;
        debug!(vendor = %self.vendor, argv = ?command.argv(), "command built");

        match self
            .supervisor
            .spawn(command, &self.env, self.guard.as_deref())?
        {
            SpawnOutcome::Started(process) => {
                let pid = process.pid();
                // A previous handle is detached; its child keeps running.
                self.process = Some(process);
                Ok(LaunchStatus::Started { pid })
            }
            SpawnOutcome::AlreadyRunning { name } => Ok(LaunchStatus::AlreadyRunning { name }),
        }
    }

    fn process(&self) -> Option<&SupervisedProcess> {
        self.process.as_ref()
    }

    fn process_mut(&mut self) -> Option<&mut SupervisedProcess> {
        self.process.as_mut()
    }
}
