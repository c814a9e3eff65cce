// src/exec/supervisor.rs

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::ResolvedEnvironment;
use crate::errors::Result;
use crate::exec::backend::{OutputMode, ProcessSpawner, TokioSpawner};
use crate::exec::command::LaunchCommand;
use crate::exec::probe::InstanceProbe;

/// A started child process and its background waiter.
///
/// The waiter is a detached task whose only job is to observe the exit. No
/// exit status is propagated back; dropping this value detaches the waiter
/// and leaves the child running.
pub struct SupervisedProcess {
    program: String,
    pid: Option<u32>,
    waiter: Option<JoinHandle<()>>,
}

impl SupervisedProcess {
    pub fn new(program: impl Into<String>, pid: Option<u32>, waiter: JoinHandle<()>) -> Self {
        Self {
            program: program.into(),
            pid,
            waiter: Some(waiter),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// True until the waiter has observed the exit.
    pub fn is_running(&self) -> bool {
        self.waiter.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Wait until the waiter has observed the exit.
    ///
    /// Returns immediately on subsequent calls.
    pub async fn wait(&mut self) {
        if let Some(waiter) = self.waiter.take() {
            if let Err(e) = waiter.await {
                warn!(program = %self.program, error = %e, "process waiter ended abnormally");
            }
        }
    }
}

impl fmt::Debug for SupervisedProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupervisedProcess")
            .field("program", &self.program)
            .field("pid", &self.pid)
            .field("running", &self.is_running())
            .finish()
    }
}

/// What happened when a launch was attempted.
#[derive(Debug)]
pub enum SpawnOutcome {
    Started(SupervisedProcess),
    /// The duplicate-instance guard found a matching process; nothing was
    /// started.
    AlreadyRunning { name: String },
}

impl SpawnOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, SpawnOutcome::Started(_))
    }
}

/// Spawns built commands and hands back supervised handles.
#[derive(Clone)]
pub struct ProcessSupervisor {
    spawner: Arc<dyn ProcessSpawner>,
    output: OutputMode,
}

impl fmt::Debug for ProcessSupervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessSupervisor")
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new(Arc::new(TokioSpawner))
    }
}

impl ProcessSupervisor {
    pub fn new(spawner: Arc<dyn ProcessSpawner>) -> Self {
        Self {
            spawner,
            output: OutputMode::default(),
        }
    }

    /// Use `output` for every child started from now on.
    ///
    /// Callers that will not keep the runtime alive until the child exits
    /// must pick [`OutputMode::Detached`].
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Start `command` with `env` applied on top of the inherited environment.
    ///
    /// With a `guard`, the live process list is inspected first; a match
    /// skips the spawn and produces a warning instead.
    pub fn spawn(
        &self,
        command: LaunchCommand,
        env: &ResolvedEnvironment,
        guard: Option<&dyn InstanceProbe>,
    ) -> Result<SpawnOutcome> {
        if let Some(name) = guard.and_then(|g| g.find_running()) {
            warn!(
                process = %name,
                program = %command.program(),
                "an instance is already running; not starting another one"
            );
            return Ok(SpawnOutcome::AlreadyRunning { name });
        }

        let process = self.spawner.spawn(&command, env, self.output)?;
        Ok(SpawnOutcome::Started(process))
    }
}
