// src/main.rs

use starterpack::launcher::LaunchContext;
use starterpack::{PluginCatalog, cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("starterpack error: {err}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    // Vendors must be loaded first: their flags make up the help text.
    let plugins = PluginCatalog::builtin()?.load_cli_plugins()?;
    let invocation = cli::parse(&plugins)?;
    logging::init_logging(invocation.args.log_level)?;
    run(invocation, &plugins, LaunchContext::from_env()).await?;
    Ok(())
}
