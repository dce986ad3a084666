//! kcfgctl - Main entry point

use clap::Parser;
use log::{debug, info};

use kcfgctl::{run_config_command, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting kcfgctl v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: kubeconfig={:?}, strict={}, command={:?}",
        cli.kubeconfig, cli.strict, cli.command
    );

    if let Err(e) = run_config_command(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
