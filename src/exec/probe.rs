// src/exec/probe.rs

//! Duplicate-instance detection.
//!
//! Matching on process names is platform specific, so each vendor supplies
//! its own predicate through [`ProcessNameProbe`].

use std::fmt;
use std::sync::Arc;

use sysinfo::{ProcessesToUpdate, System};

/// Source of the names of currently running processes.
pub trait ProcessTable: Send + Sync {
    fn process_names(&self) -> Vec<String>;
}

/// Live process list read through `sysinfo`.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
    fn process_names(&self) -> Vec<String> {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);
        system
            .processes()
            .values()
            .map(|p| p.name().to_string_lossy().into_owned())
            .collect()
    }
}

/// Answers "is an instance of this application already running?".
pub trait InstanceProbe: Send + Sync {
    /// Name of a matching running process, if any.
    fn find_running(&self) -> Option<String>;
}

type NameMatcher = dyn Fn(&str) -> bool + Send + Sync;

/// Probe that applies a name predicate to a [`ProcessTable`].
#[derive(Clone)]
pub struct ProcessNameProbe {
    table: Arc<dyn ProcessTable>,
    matcher: Arc<NameMatcher>,
}

impl fmt::Debug for ProcessNameProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessNameProbe").finish_non_exhaustive()
    }
}

impl ProcessNameProbe {
    pub fn new<F>(table: Arc<dyn ProcessTable>, matcher: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            table,
            matcher: Arc::new(matcher),
        }
    }

    /// Match any of `names`, ignoring ASCII case.
    pub fn any_of(table: Arc<dyn ProcessTable>, names: &[&str]) -> Self {
        let names: Vec<String> = names.iter().map(|n| n.to_ascii_lowercase()).collect();
        Self::new(table, move |candidate| {
            let candidate = candidate.to_ascii_lowercase();
            names.iter().any(|n| *n == candidate)
        })
    }
}

impl InstanceProbe for ProcessNameProbe {
    fn find_running(&self) -> Option<String> {
        self.table
            .process_names()
            .into_iter()
            .find(|name| (self.matcher)(name))
    }
}
