use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{ArgMatches, Command};
use starterpack::errors::Result;
use starterpack::exec::SupervisedProcess;
use starterpack::launcher::{LaunchArgs, LaunchContext, LaunchStatus, Launcher, LauncherFactory};
use starterpack::plugin::{VendorCli, VendorCore, VendorPlugin};

/// A configurable plugin for catalog and registry tests.
#[derive(Debug)]
pub struct TestPlugin {
    pub name: &'static str,
    pub registrable: bool,
    pub has_cli: bool,
    pub has_core: bool,
    /// Number of launchers executed through either side.
    pub executions: Arc<AtomicUsize>,
}

impl TestPlugin {
    /// A plugin with both sides that can be registered.
    pub fn complete(name: &'static str) -> Self {
        Self {
            name,
            registrable: true,
            has_cli: true,
            has_core: true,
            executions: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unregistrable(name: &'static str) -> Self {
        Self {
            registrable: false,
            ..Self::complete(name)
        }
    }

    pub fn without_cli(name: &'static str) -> Self {
        Self {
            has_cli: false,
            ..Self::complete(name)
        }
    }

    pub fn without_core(name: &'static str) -> Self {
        Self {
            has_core: false,
            ..Self::complete(name)
        }
    }

    pub fn into_arc(self) -> Arc<dyn VendorPlugin> {
        Arc::new(self)
    }
}

impl VendorPlugin for TestPlugin {
    fn name(&self) -> &'static str {
        self.name
    }

    fn can_be_registered(&self) -> bool {
        self.registrable
    }

    fn cli(&self) -> Option<&dyn VendorCli> {
        if self.has_cli { Some(self) } else { None }
    }

    fn core(&self) -> Option<&dyn VendorCore> {
        if self.has_core { Some(self) } else { None }
    }
}

impl VendorCli for TestPlugin {
    fn register_cli(&self, command: Command) -> Command {
        command.arg(
            clap::Arg::new("flag")
                .long("flag")
                .action(clap::ArgAction::SetTrue),
        )
    }

    fn execute(&self, _matches: &ArgMatches, _ctx: &LaunchContext) -> Result<Box<dyn Launcher>> {
        let mut launcher = StubLauncher::new(self.name, Arc::clone(&self.executions));
        launcher.execute()?;
        Ok(Box::new(launcher))
    }
}

impl VendorCore for TestPlugin {
    fn register_launcher(&self) -> LauncherFactory {
        let name = self.name;
        let executions = Arc::clone(&self.executions);
        Arc::new(
            move |_args: &LaunchArgs, _ctx: &LaunchContext| -> Result<Box<dyn Launcher>> {
                Ok(Box::new(StubLauncher::new(name, Arc::clone(&executions))))
            },
        )
    }
}

/// Launcher that counts executions and never spawns anything.
#[derive(Debug)]
pub struct StubLauncher {
    vendor: &'static str,
    executions: Arc<AtomicUsize>,
}

impl StubLauncher {
    pub fn new(vendor: &'static str, executions: Arc<AtomicUsize>) -> Self {
        Self { vendor, executions }
    }
}

impl Launcher for StubLauncher {
    fn vendor(&self) -> &str {
        self.vendor
    }

    fn execute(&mut self) -> Result<LaunchStatus> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(LaunchStatus::Started { pid: None })
    }

    fn process(&self) -> Option<&SupervisedProcess> {
        None
    }

    fn process_mut(&mut self) -> Option<&mut SupervisedProcess> {
        None
    }
}
