// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] holds the immutable [`LaunchCommand`] argument vector.
//! - [`backend`] provides the `ProcessSpawner` trait and the production
//!   `TokioSpawner`, which tests replace with a fake implementation.
//! - [`supervisor`] owns the spawn step, the duplicate-instance guard and the
//!   [`SupervisedProcess`] handle.
//! - [`probe`] contains the process-table based instance probes.

pub mod backend;
pub mod command;
pub mod probe;
pub mod supervisor;

pub use backend::{OutputMode, ProcessSpawner, TokioSpawner};
pub use command::LaunchCommand;
pub use probe::{InstanceProbe, ProcessNameProbe, ProcessTable, SystemProcessTable};
pub use supervisor::{ProcessSupervisor, SpawnOutcome, SupervisedProcess};
