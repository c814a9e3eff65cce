#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use starterpack::config::ConfigResolver;
use starterpack::exec::ProcessSupervisor;
use starterpack::fs::mock::MockFileSystem;
use starterpack::launcher::LaunchContext;

use crate::fake_spawner::{FakeProcessTable, FakeSpawner};

/// Where `TestContextBuilder::global_config` puts the global document.
pub const GLOBAL_CONFIG_PATH: &str = "/studio/config/global.yaml";

/// Builder for a `LaunchContext` backed by in-memory fakes.
pub struct TestContextBuilder {
    fs: MockFileSystem,
    global_path: Option<PathBuf>,
    spawner: Arc<FakeSpawner>,
    processes: Arc<FakeProcessTable>,
}

/// A built context plus handles to inspect the fakes behind it.
pub struct TestContext {
    pub ctx: LaunchContext,
    pub fs: MockFileSystem,
    pub spawner: Arc<FakeSpawner>,
    pub processes: Arc<FakeProcessTable>,
}

impl TestContextBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
            global_path: None,
            spawner: FakeSpawner::new(),
            processes: FakeProcessTable::new(Vec::<String>::new()),
        }
    }

    /// Write the global document at [`GLOBAL_CONFIG_PATH`] and point the
    /// resolver at it.
    pub fn global_config(self, contents: &str) -> Self {
        self.global_config_at(GLOBAL_CONFIG_PATH, contents)
    }

    pub fn global_config_at(mut self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.fs.add_file(path.as_ref(), contents);
        self.global_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Point the resolver at a path without creating it.
    pub fn global_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.global_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.fs.add_file(path, contents);
        self
    }

    pub fn running_process(self, name: &str) -> Self {
        self.processes.add(name);
        self
    }

    pub fn spawner(mut self, spawner: Arc<FakeSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new(Arc::new(self.fs.clone()), self.global_path.clone())
    }

    pub fn build(self) -> TestContext {
        let ctx = LaunchContext::new(
            Arc::new(self.fs.clone()),
            self.resolver(),
            ProcessSupervisor::new(self.spawner.clone()),
            self.processes.clone(),
        );

        TestContext {
            ctx,
            fs: self.fs,
            spawner: self.spawner,
            processes: self.processes,
        }
    }
}

impl Default for TestContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
