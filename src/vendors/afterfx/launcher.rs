// src/vendors/afterfx/launcher.rs

use tracing::info;

use crate::errors::Result;
use crate::exec::ProcessNameProbe;
use crate::launcher::{LaunchContext, SupervisedLauncher};
use crate::vendors::afterfx::{AfterFxCommandBuilder, AfterFxOptions, PROCESS_NAMES, VENDOR_NAME};

pub type AfterFxLauncher = SupervisedLauncher<AfterFxCommandBuilder>;

/// Resolve the `afterfx` configuration, validate `options` and return a
/// launcher ready to execute.
pub fn create_launcher(options: &AfterFxOptions, ctx: &LaunchContext) -> Result<AfterFxLauncher> {
    let resolved = ctx
        .config
        .resolve(VENDOR_NAME, options.soft_version.as_deref())?;
    info!(
        vendor = VENDOR_NAME,
        version = ?resolved.version,
        env_vars = resolved.env.len(),
        "configuration loaded"
    );

    let builder = AfterFxCommandBuilder::new(ctx.fs.as_ref(), options, &resolved)?;

    let launcher = SupervisedLauncher::new(VENDOR_NAME, builder, resolved.env, ctx.supervisor.clone());
    if options.single_instance {
        let probe = ProcessNameProbe::any_of(ctx.process_table.clone(), PROCESS_NAMES);
        Ok(launcher.with_guard(Box::new(probe)))
    } else {
        Ok(launcher)
    }
}
