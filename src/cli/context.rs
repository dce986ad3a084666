//! Config management CLI arguments (kubectl-style)

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Subcommands for editing the kubeconfig
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Delete the specified context, then remove clusters and users left unreferenced
    #[command(name = "delete-context")]
    DeleteContext(DeleteContextArgs),

    /// Remove clusters and users that no context references
    Prune,

    /// Set a context entry in the kubeconfig
    #[command(name = "set-context")]
    SetContext(SetContextArgs),

    /// Set the current-context in the kubeconfig
    #[command(name = "use-context")]
    UseContext(UseContextArgs),

    /// Describe all contexts
    #[command(name = "get-contexts")]
    GetContexts,

    /// Display the current-context
    #[command(name = "current-context")]
    CurrentContext,

    /// Display the kubeconfig
    View(ViewArgs),

    /// Report contexts that reference missing clusters or users
    Check,
}

/// Arguments for 'delete-context' subcommand
#[derive(Parser, Debug)]
pub struct DeleteContextArgs {
    /// Context name to delete
    pub name: String,

    /// Keep clusters and users the deleted context leaves unreferenced
    #[arg(long, default_value_t = false)]
    pub no_prune: bool,
}

/// Arguments for 'set-context' subcommand
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        kcfgctl set-context prod --cluster prod-cluster --user admin\n  \
        kcfgctl set-context prod --user readonly   # update existing context")]
pub struct SetContextArgs {
    /// Context name
    pub name: String,
    /// Cluster the context points at
    #[arg(long)]
    pub cluster: Option<String>,
    /// User (auth-info) the context authenticates as
    #[arg(long)]
    pub user: Option<String>,
}

/// Arguments for 'use-context' subcommand
#[derive(Parser, Debug)]
pub struct UseContextArgs {
    /// Context name to activate
    pub name: String,
}

/// Arguments for 'view' subcommand
#[derive(Parser, Debug)]
pub struct ViewArgs {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}
