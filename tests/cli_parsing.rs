// tests/cli_parsing.rs

mod common;
use crate::common::{TestResult, init_tracing};

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use starterpack::cli::try_parse_from;
use starterpack::errors::StarterpackError;
use starterpack::exec::OutputMode;
use starterpack::plugin::VendorPlugin;
use starterpack::vendors::afterfx::{AfterFx, AfterFxOptions};
use starterpack_test_utils::builders::TestContextBuilder;
use starterpack_test_utils::plugins::TestPlugin;

fn afterfx() -> Vec<Arc<dyn VendorPlugin>> {
    vec![Arc::new(AfterFx)]
}

#[test]
fn no_arguments_selects_no_vendor() -> TestResult {
    let invocation = try_parse_from(&afterfx(), ["starterpack"])?;

    assert!(invocation.vendor.is_none());
    assert!(!invocation.args.detach);
    Ok(())
}

#[test]
fn unknown_vendor_is_reported_by_name() {
    match try_parse_from(&afterfx(), ["starterpack", "nuke"]) {
        Err(StarterpackError::UnknownVendor(name)) => assert_eq!(name, "nuke"),
        Err(e) => panic!("expected UnknownVendor, got {e:?}"),
        Ok(_) => panic!("expected UnknownVendor, got Ok"),
    }

    // Same outcome when no vendor is registered at all.
    assert!(matches!(
        try_parse_from(&[], ["starterpack", "nuke"]),
        Err(StarterpackError::UnknownVendor(name)) if name == "nuke"
    ));
}

#[test]
fn unknown_vendor_flag_is_invalid() {
    assert!(matches!(
        try_parse_from(&afterfx(), ["starterpack", "afterfx", "--fullscreen"]),
        Err(StarterpackError::InvalidArgument(_))
    ));
}

#[test]
fn afterfx_flags_become_options() -> TestResult {
    let invocation = try_parse_from(
        &afterfx(),
        [
            "starterpack",
            "--detach",
            "--log-level",
            "debug",
            "afterfx",
            "--bin-path",
            "/opt/adobe/AfterFX",
            "--no-gui",
            "--script-path",
            "/studio/scripts/render.jsx",
            "--soft-version",
            "2024",
            "--single-instance",
            "--script-args",
            "frames",
            "10",
            "offset",
            "-5",
        ],
    )?;

    assert!(invocation.args.detach);
    let vendor = invocation.vendor.expect("vendor subcommand");
    assert_eq!(vendor.plugin.name(), "afterfx");

    let options = AfterFxOptions::from_arg_matches(&vendor.matches);
    assert_eq!(
        options,
        AfterFxOptions {
            bin_path: Some(PathBuf::from("/opt/adobe/AfterFX")),
            no_gui: true,
            script_path: Some(PathBuf::from("/studio/scripts/render.jsx")),
            script_args: ["frames", "10", "offset", "-5"].map(String::from).to_vec(),
            soft_version: Some("2024".to_string()),
            single_instance: true,
        }
    );
    Ok(())
}

#[test]
fn flags_after_script_args_are_still_parsed() -> TestResult {
    let invocation = try_parse_from(
        &afterfx(),
        [
            "starterpack",
            "afterfx",
            "--script-args",
            "frames",
            "10",
            "--script-path",
            "/s/render.jsx",
            "--no-gui",
        ],
    )?;

    let vendor = invocation.vendor.expect("vendor subcommand");
    let options = AfterFxOptions::from_arg_matches(&vendor.matches);
    assert_eq!(options.script_args, vec!["frames", "10"]);
    assert_eq!(options.script_path, Some(PathBuf::from("/s/render.jsx")));
    assert!(options.no_gui);
    Ok(())
}

#[tokio::test]
async fn run_executes_the_selected_vendor() -> TestResult {
    init_tracing();

    let plugin = TestPlugin::complete("alpha");
    let executions = plugin.executions.clone();
    let plugins = vec![plugin.into_arc()];

    let invocation = try_parse_from(&plugins, ["starterpack", "alpha", "--flag"])?;
    let test_ctx = TestContextBuilder::new().build();

    starterpack::run(invocation, &plugins, test_ctx.ctx).await?;

    assert_eq!(executions.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn run_through_afterfx_waits_for_the_process() -> TestResult {
    init_tracing();

    let test_ctx = TestContextBuilder::new()
        .file("/opt/adobe/AfterFX", "")
        .build();
    let plugins = afterfx();

    let invocation = try_parse_from(
        &plugins,
        ["starterpack", "afterfx", "--bin-path", "/opt/adobe/AfterFX"],
    )?;
    starterpack::run(invocation, &plugins, test_ctx.ctx).await?;

    let spawned = test_ctx.spawner.spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].argv, vec!["/opt/adobe/AfterFX"]);
    assert_eq!(spawned[0].output, OutputMode::Captured);
    Ok(())
}

#[tokio::test]
async fn detach_starts_the_child_with_detached_output() -> TestResult {
    init_tracing();

    let test_ctx = TestContextBuilder::new()
        .file("/opt/adobe/AfterFX", "")
        .build();
    let plugins = afterfx();

    let invocation = try_parse_from(
        &plugins,
        ["starterpack", "--detach", "afterfx", "--bin-path", "/opt/adobe/AfterFX"],
    )?;
    starterpack::run(invocation, &plugins, test_ctx.ctx).await?;

    let spawned = test_ctx.spawner.spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].output, OutputMode::Detached);
    Ok(())
}

#[tokio::test]
async fn run_surfaces_validation_errors() {
    let test_ctx = TestContextBuilder::new()
        .file("/opt/adobe/AfterFX", "")
        .build();
    let plugins = afterfx();

    let invocation = try_parse_from(
        &plugins,
        ["starterpack", "afterfx", "--bin-path", "/opt/adobe/AfterFX", "--no-gui"],
    )
    .expect("valid command line");

    let result = starterpack::run(invocation, &plugins, test_ctx.ctx).await;
    assert!(matches!(result, Err(StarterpackError::InvalidArgument(_))));
}
