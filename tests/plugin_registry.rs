// tests/plugin_registry.rs

mod common;
use crate::common::{AFTERFX_CONFIG_PATH, AFTERFX_YAML, GLOBAL_YAML, TestResult, init_tracing};

use std::sync::Arc;
use std::sync::atomic::Ordering;

use starterpack::errors::StarterpackError;
use starterpack::launcher::{LaunchArgs, LaunchStatus, Launcher};
use starterpack::plugin::{PluginCatalog, PluginIdentity, VENDOR_NAMESPACE, VendorCore, VendorPlugin};
use starterpack::registry::LauncherRegistry;
use starterpack::vendors::afterfx::{AfterFx, AfterFxOptions, VENDOR_NAME, create_launcher};
use starterpack_test_utils::builders::TestContextBuilder;
use starterpack_test_utils::plugins::TestPlugin;

const NS: &str = "tests::vendors";

fn names(plugins: &[Arc<dyn VendorPlugin>]) -> Vec<&'static str> {
    plugins.iter().map(|p| p.name()).collect()
}

#[test]
fn unregistrable_plugins_are_skipped_on_both_sides() -> TestResult {
    init_tracing();

    let catalog = PluginCatalog::new(
        NS,
        vec![
            TestPlugin::complete("alpha").into_arc(),
            TestPlugin::unregistrable("beta").into_arc(),
        ],
    )?;

    assert_eq!(names(&catalog.load_cli_plugins()?), vec!["alpha"]);
    assert_eq!(names(&catalog.load_core_plugins()?), vec!["alpha"]);

    // Discovery still lists everything installed.
    let discovered: Vec<String> = catalog.discover().into_iter().map(|i| i.name).collect();
    assert_eq!(discovered, vec!["alpha", "beta"]);
    Ok(())
}

#[test]
fn missing_cli_side_is_a_contract_violation() -> TestResult {
    init_tracing();

    let catalog = PluginCatalog::new(
        NS,
        vec![
            TestPlugin::complete("alpha").into_arc(),
            TestPlugin::without_cli("beta").into_arc(),
        ],
    )?;

    match catalog.load_cli_plugins() {
        Err(StarterpackError::ContractViolation(msg)) => assert!(msg.contains("beta")),
        Err(e) => panic!("expected ContractViolation, got {e:?}"),
        Ok(_) => panic!("expected ContractViolation, got Ok"),
    }

    // The core side of the same catalog is complete.
    assert_eq!(catalog.load_core_plugins()?.len(), 2);
    Ok(())
}

#[test]
fn missing_core_side_is_a_contract_violation_even_when_unregistrable() -> TestResult {
    let plugin = TestPlugin {
        registrable: false,
        ..TestPlugin::without_core("gamma")
    };
    let catalog = PluginCatalog::new(NS, vec![plugin.into_arc()])?;

    assert!(matches!(
        catalog.load_core_plugins(),
        Err(StarterpackError::ContractViolation(_))
    ));
    Ok(())
}

#[test]
fn duplicate_vendor_names_are_rejected() {
    let result = PluginCatalog::new(
        NS,
        vec![
            TestPlugin::complete("alpha").into_arc(),
            TestPlugin::complete("alpha").into_arc(),
        ],
    );

    match result {
        Err(StarterpackError::ContractViolation(msg)) => assert!(msg.contains("alpha")),
        other => panic!("expected ContractViolation, got {other:?}"),
    }
}

#[test]
fn load_rejects_unknown_identities() -> TestResult {
    let catalog = PluginCatalog::new(NS, vec![TestPlugin::complete("alpha").into_arc()])?;

    let known = PluginIdentity {
        namespace: NS.to_string(),
        name: "alpha".to_string(),
    };
    assert_eq!(catalog.load(&known)?.name(), "alpha");
    assert_eq!(known.to_string(), "tests::vendors::alpha");

    for identity in [
        PluginIdentity {
            namespace: NS.to_string(),
            name: "nuke".to_string(),
        },
        PluginIdentity {
            namespace: "other".to_string(),
            name: "alpha".to_string(),
        },
    ] {
        assert!(matches!(
            catalog.load(&identity),
            Err(StarterpackError::UnknownVendor(_))
        ));
    }
    Ok(())
}

#[test]
fn builtin_catalog_installs_afterfx() -> TestResult {
    let catalog = PluginCatalog::builtin()?;

    let identities = catalog.discover();
    assert!(identities.contains(&PluginIdentity {
        namespace: VENDOR_NAMESPACE.to_string(),
        name: VENDOR_NAME.to_string(),
    }));
    Ok(())
}

#[tokio::test]
async fn registry_launch_executes_the_factory_launcher() -> TestResult {
    init_tracing();

    let plugin = TestPlugin::complete("alpha");
    let executions = plugin.executions.clone();
    let catalog = PluginCatalog::new(NS, vec![plugin.into_arc()])?;
    let registry = LauncherRegistry::from_catalog(&catalog)?;
    let test_ctx = TestContextBuilder::new().build();

    let launcher = registry.launch("alpha", &LaunchArgs::new(), &test_ctx.ctx)?;

    assert_eq!(launcher.vendor(), "alpha");
    assert_eq!(executions.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn loading_vendor_launchers_twice_is_a_no_op() -> TestResult {
    init_tracing();

    let first = PluginCatalog::new(NS, vec![TestPlugin::complete("alpha").into_arc()])?;
    let second = PluginCatalog::new(NS, vec![TestPlugin::complete("beta").into_arc()])?;

    let mut registry = LauncherRegistry::new();
    registry.load_vendor_launchers(&first)?;
    registry.load_vendor_launchers(&second)?;

    assert_eq!(registry.vendor_names(), vec!["alpha"]);
    assert!(!registry.contains("beta"));
    Ok(())
}

#[test]
fn unknown_vendor_is_reported() -> TestResult {
    let registry = LauncherRegistry::new();
    let test_ctx = TestContextBuilder::new().build();

    assert!(matches!(
        registry.resolve("nuke"),
        Err(StarterpackError::UnknownVendor(name)) if name == "nuke"
    ));
    assert!(matches!(
        registry.launch("nuke", &LaunchArgs::new(), &test_ctx.ctx),
        Err(StarterpackError::UnknownVendor(_))
    ));
    Ok(())
}

#[tokio::test]
async fn afterfx_launches_through_the_registry() -> TestResult {
    init_tracing();

    let test_ctx = TestContextBuilder::new()
        .global_config(GLOBAL_YAML)
        .file(AFTERFX_CONFIG_PATH, AFTERFX_YAML)
        .file("/opt/adobe/2023/AfterFX", "")
        .file("/studio/scripts/render.jsx", "")
        .build();

    let mut registry = LauncherRegistry::new();
    registry.register(VENDOR_NAME, AfterFx.register_launcher());

    let args = LaunchArgs::new()
        .with_text("soft_version", "2023")
        .with_text("script_path", "/studio/scripts/render.jsx")
        .with_list("script_args", ["shot", "'sh010'"])
        .with_flag("no_gui", true);

    let launcher = registry.launch(VENDOR_NAME, &args, &test_ctx.ctx)?;
    assert_eq!(launcher.process().and_then(|p| p.pid()), Some(1000));

    let spawned = test_ctx.spawner.spawned();
    assert_eq!(spawned.len(), 1);

    let record = &spawned[0];
    assert_eq!(record.argv[0], "/opt/adobe/2023/AfterFX");
    assert_eq!(record.argv[1], "-noui");
    assert!(record.argv[3].contains(r#"readJsonString('{"shot":"sh010"}')"#));
    assert_eq!(record.env.get("AE_VERSION"), Some("2023"));
    assert_eq!(record.env.get("STUDIO_ROOT"), Some("/mnt/studio"));
    Ok(())
}

#[tokio::test]
async fn afterfx_rejects_unknown_or_mistyped_options() -> TestResult {
    let test_ctx = TestContextBuilder::new().build();
    let factory = AfterFx.register_launcher();

    let unknown = LaunchArgs::new().with_flag("fullscreen", true);
    assert!(matches!(
        factory(&unknown, &test_ctx.ctx),
        Err(StarterpackError::InvalidArgument(msg)) if msg.contains("fullscreen")
    ));

    let mistyped = LaunchArgs::new().with_text("no_gui", "yes");
    assert!(matches!(
        factory(&mistyped, &test_ctx.ctx),
        Err(StarterpackError::InvalidArgument(_))
    ));

    assert_eq!(test_ctx.spawner.spawn_count(), 0);
    Ok(())
}

#[tokio::test]
async fn single_instance_guard_skips_the_spawn() -> TestResult {
    init_tracing();

    let test_ctx = TestContextBuilder::new()
        .file("/opt/adobe/AfterFX", "")
        .running_process("afterfx.exe")
        .build();

    let mut registry = LauncherRegistry::new();
    registry.register(VENDOR_NAME, AfterFx.register_launcher());

    let args = LaunchArgs::new()
        .with_text("bin_path", "/opt/adobe/AfterFX")
        .with_flag("single_instance", true);

    let launcher = registry.launch(VENDOR_NAME, &args, &test_ctx.ctx)?;

    assert!(launcher.process().is_none());
    assert_eq!(test_ctx.spawner.spawn_count(), 0);

    // Without the flag the running instance is ignored.
    let args = LaunchArgs::new().with_text("bin_path", "/opt/adobe/AfterFX");
    registry.launch(VENDOR_NAME, &args, &test_ctx.ctx)?;
    assert_eq!(test_ctx.spawner.spawn_count(), 1);
    Ok(())
}

#[tokio::test]
async fn launch_status_reports_the_guard() -> TestResult {
    let test_ctx = TestContextBuilder::new()
        .file("/opt/adobe/AfterFX", "")
        .running_process("AfterFX")
        .build();

    let options = AfterFxOptions {
        bin_path: Some("/opt/adobe/AfterFX".into()),
        single_instance: true,
        ..Default::default()
    };
    let mut launcher = create_launcher(&options, &test_ctx.ctx)?;

    assert_eq!(
        launcher.execute()?,
        LaunchStatus::AlreadyRunning {
            name: "AfterFX".to_string()
        }
    );
    Ok(())
}
