//! Kubeconfig command handlers

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use log::{info, warn};

use crate::cli::{Cli, ConfigAction, OutputFormat, SetContextArgs};
use crate::error::KcfgError;

use super::codec;
use super::editor::{ContextChange, ContextEditor, PruneReport};
use super::resolve::resolve_kubeconfig_path;
use super::store::KubeConfigStore;

/// Dispatch kubeconfig subcommands
pub fn run_config_command(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_kubeconfig_path(cli.kubeconfig.as_deref())?;
    let store = KubeConfigStore::with_path(path).strict(cli.strict);
    match &cli.command {
        ConfigAction::DeleteContext(args) => {
            run_context_delete(&store, &args.name, !args.no_prune)
        }
        ConfigAction::Prune => run_prune(&store),
        ConfigAction::SetContext(args) => run_context_set(&store, args),
        ConfigAction::UseContext(args) => run_context_use(&store, &args.name),
        ConfigAction::GetContexts => run_context_list(&store),
        ConfigAction::CurrentContext => run_context_show(&store),
        ConfigAction::View(args) => run_config_view(&store, args.output),
        ConfigAction::Check => run_check(&store),
    }
}

/// Delete a named context, optionally pruning what it leaves behind
fn run_context_delete(
    store: &KubeConfigStore,
    name: &str,
    prune: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = store.load()?;

    if !graph.contexts.contains_key(name) {
        warn!(
            "Context '{}' does not exist in {}, ignoring",
            name,
            store.path().display()
        );
        println!("Context '{}' not found, nothing to delete", name);
        return Ok(());
    }

    let mut editor = ContextEditor::new(&mut graph);
    editor.delete_context(name);
    let pruned = if prune {
        editor.remove_orphans()
    } else {
        PruneReport::default()
    };

    store.save(&graph)?;
    println!(
        "✓ Deleted context '{}' from {}",
        name,
        store.path().display()
    );
    if let Some(current) = graph.current_context() {
        println!("  Current context: {}", current);
    }
    print_prune_report(&pruned);

    Ok(())
}

/// Remove orphaned clusters and users
fn run_prune(store: &KubeConfigStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = store.load()?;
    let report = ContextEditor::new(&mut graph).remove_orphans();

    if report.is_empty() {
        println!("Nothing to prune.");
        return Ok(());
    }

    store.save(&graph)?;
    print_prune_report(&report);
    info!("Pruned {} entries", report.total());
    Ok(())
}

fn print_prune_report(report: &PruneReport) {
    for name in &report.clusters {
        println!("✓ Removed orphaned cluster '{}'", name);
    }
    for name in &report.auth_infos {
        println!("✓ Removed orphaned user '{}'", name);
    }
}

/// Create or update a named context
fn run_context_set(
    store: &KubeConfigStore,
    args: &SetContextArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = store.load_or_default()?;

    let change = ContextEditor::new(&mut graph).set_context(
        &args.name,
        args.cluster.as_deref(),
        args.user.as_deref(),
    )?;
    store.save(&graph)?;

    match change {
        ContextChange::Created => println!("✓ Created context '{}'", args.name),
        ContextChange::Updated => println!("✓ Updated context '{}'", args.name),
    }
    Ok(())
}

/// Switch the active context
fn run_context_use(store: &KubeConfigStore, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = store.load()?;
    ContextEditor::new(&mut graph).use_context(name)?;
    store.save(&graph)?;
    println!("✓ Switched to context '{}'", name);
    Ok(())
}

/// List all contexts
fn run_context_list(store: &KubeConfigStore) -> Result<(), Box<dyn std::error::Error>> {
    let graph = store.load()?;

    if graph.contexts.is_empty() {
        println!("No contexts configured.");
        println!(
            "\nUse 'kcfgctl set-context <name> --cluster <cluster> --user <user>' to create one."
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("CURRENT"),
            Cell::new("NAME"),
            Cell::new("CLUSTER"),
            Cell::new("AUTHINFO"),
            Cell::new("NAMESPACE"),
        ]);

    for (name, ctx) in &graph.contexts {
        let current_marker = if graph.current_context == *name { "*" } else { "" };

        table.add_row(vec![
            Cell::new(current_marker),
            Cell::new(name),
            Cell::new(&ctx.cluster),
            Cell::new(&ctx.user),
            Cell::new(ctx.namespace.as_deref().unwrap_or("")),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Print the current context name
fn run_context_show(store: &KubeConfigStore) -> Result<(), Box<dyn std::error::Error>> {
    let graph = store.load()?;

    let current = graph.current_context().ok_or_else(|| {
        KcfgError::Config(
            "current-context is not set. Use 'kcfgctl use-context <name>' to set one.".to_string(),
        )
    })?;

    if !graph.contexts.contains_key(current) {
        warn!("Current context '{}' not found in kubeconfig", current);
    }
    println!("{}", current);
    Ok(())
}

/// Display the kubeconfig
fn run_config_view(
    store: &KubeConfigStore,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = store.load()?;
    match format {
        OutputFormat::Yaml => print!("{}", codec::encode(&graph)?),
        OutputFormat::Json => {
            let document = codec::to_document(&graph)?;
            let json = serde_json::to_string_pretty(&document).map_err(KcfgError::from)?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Report dangling context references
fn run_check(store: &KubeConfigStore) -> Result<(), Box<dyn std::error::Error>> {
    let graph = store.load()?;
    let dangling = graph.dangling_references();

    if dangling.is_empty() {
        println!("✓ All context references resolve");
        return Ok(());
    }

    for reference in &dangling {
        println!("✗ {}", reference);
    }
    Err(KcfgError::Config(format!(
        "{} dangling reference(s) in {}",
        dangling.len(),
        store.path().display()
    ))
    .into())
}
