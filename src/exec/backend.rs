// src/exec/backend.rs

//! Pluggable spawner backend.
//!
//! The supervisor talks to a `ProcessSpawner` instead of `tokio::process`
//! directly, so tests can record commands without starting real processes.
//!
//! - `TokioSpawner` is the production implementation. It starts the child,
//!   wires its output according to [`OutputMode`] and hands the exit wait to a
//!   detached Tokio task.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::ResolvedEnvironment;
use crate::errors::{Result, StarterpackError};
use crate::exec::command::LaunchCommand;
use crate::exec::supervisor::SupervisedProcess;

/// Where a spawned child's stdout and stderr go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Piped and logged at `debug` by tasks on the current runtime.
    ///
    /// Only valid while the runtime outlives the child: once the readers are
    /// gone the child's next write fails with a broken pipe.
    #[default]
    Captured,
    /// Sent to the null device, so the child does not depend on the launcher
    /// staying alive.
    Detached,
}

/// Trait abstracting how a built command becomes a running process.
///
/// Implementations must not block on the child: they return as soon as the
/// process has been started.
pub trait ProcessSpawner: Send + Sync {
    fn spawn(
        &self,
        command: &LaunchCommand,
        env: &ResolvedEnvironment,
        output: OutputMode,
    ) -> Result<SupervisedProcess>;
}

/// Real spawner used in production. Must be called within a Tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioSpawner;

impl ProcessSpawner for TokioSpawner {
    fn spawn(
        &self,
        command: &LaunchCommand,
        env: &ResolvedEnvironment,
        output: OutputMode,
    ) -> Result<SupervisedProcess> {
        let program = command.program().to_string();
        info!(program = %program, cmd = %command, ?output, "starting process");

        let mut cmd = Command::new(&program);
        cmd.args(command.args())
            .envs(env.iter())
            // The child outlives the launcher if the caller stops waiting.
            .kill_on_drop(false);
        match output {
            OutputMode::Captured => cmd.stdout(Stdio::piped()).stderr(Stdio::piped()),
            OutputMode::Detached => cmd.stdout(Stdio::null()).stderr(Stdio::null()),
        };

        let mut child = cmd.spawn().map_err(|source| StarterpackError::LaunchFailure {
            program: program.clone(),
            source,
        })?;

        let pid = child.id();
        info!(program = %program, pid = ?pid, "process started");

        if let Some(stdout) = child.stdout.take() {
            drain_lines(program.clone(), "stdout", stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            drain_lines(program.clone(), "stderr", stderr);
        }

        let waiter_program = program.clone();
        let waiter = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => info!(
                    program = %waiter_program,
                    pid = ?pid,
                    exit_code = ?status.code(),
                    success = status.success(),
                    "process exited"
                ),
                Err(e) => warn!(
                    program = %waiter_program,
                    pid = ?pid,
                    error = %e,
                    "failed to wait for process"
                ),
            }
        });

        Ok(SupervisedProcess::new(program, pid, waiter))
    }
}

/// Consume a child pipe so its buffer never fills; log lines at debug.
fn drain_lines<R>(program: String, stream: &'static str, reader: R)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(program = %program, stream, "{}", line);
        }
    });
}
