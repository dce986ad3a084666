//! CLI argument parsing

mod common;
mod context;

use std::path::PathBuf;

use clap::Parser;

use crate::config::defaults;

pub use common::OutputFormat;
pub use context::{ConfigAction, DeleteContextArgs, SetContextArgs, UseContextArgs, ViewArgs};

/// kcfgctl CLI
#[derive(Parser, Debug)]
#[command(name = "kcfgctl")]
#[command(version)]
#[command(
    about = "Keep kubeconfig files consistent: delete contexts and prune orphaned clusters and users",
    long_about = None
)]
pub struct Cli {
    /// Path to the kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        short,
        long,
        global = true,
        env = "KCFGCTL_LOG_LEVEL",
        default_value = defaults::LOG_LEVEL
    )]
    pub log_level: String,

    /// Refuse to load kubeconfigs whose contexts reference missing clusters or users
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: ConfigAction,
}
