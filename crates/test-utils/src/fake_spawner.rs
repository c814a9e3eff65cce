use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use starterpack::config::ResolvedEnvironment;
use starterpack::errors::{Result, StarterpackError};
use starterpack::exec::{LaunchCommand, OutputMode, ProcessSpawner, ProcessTable, SupervisedProcess};

/// One call to [`FakeSpawner::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub argv: Vec<String>,
    pub env: ResolvedEnvironment,
    pub output: OutputMode,
}

/// A spawner that:
/// - records which commands were "spawned" and with which environment
/// - returns a handle whose waiter finishes immediately
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Default)]
pub struct FakeSpawner {
    spawned: Mutex<Vec<SpawnRecord>>,
    next_pid: AtomicU32,
    fail: bool,
}

impl FakeSpawner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_pid: AtomicU32::new(1000),
            ..Self::default()
        })
    }

    /// A spawner whose every spawn fails like a missing executable.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn spawned(&self) -> Vec<SpawnRecord> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().unwrap().len()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(
        &self,
        command: &LaunchCommand,
        env: &ResolvedEnvironment,
        output: OutputMode,
    ) -> Result<SupervisedProcess> {
        if self.fail {
            return Err(StarterpackError::LaunchFailure {
                program: command.program().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "fake spawn failure"),
            });
        }

        self.spawned.lock().unwrap().push(SpawnRecord {
            argv: command.argv().to_vec(),
            env: env.clone(),
            output,
        });

        let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
        let waiter = tokio::spawn(async {});
        Ok(SupervisedProcess::new(command.program(), Some(pid), waiter))
    }
}

/// A process table with a fixed, editable list of names.
#[derive(Debug, Default)]
pub struct FakeProcessTable {
    names: Mutex<Vec<String>>,
}

impl FakeProcessTable {
    pub fn new<I, S>(names: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            names: Mutex::new(names.into_iter().map(Into::into).collect()),
        })
    }

    pub fn add(&self, name: &str) {
        self.names.lock().unwrap().push(name.to_string());
    }
}

impl ProcessTable for FakeProcessTable {
    fn process_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}
