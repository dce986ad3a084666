//! Kubeconfig management module
//!
//! Loads a kubeconfig into a [`ConfigGraph`], edits it through a
//! [`ContextEditor`] that keeps context -> cluster/user references
//! consistent, and writes it back through a [`KubeConfigStore`].

pub mod codec;
mod commands;
mod editor;
mod graph;
mod models;
mod resolve;
mod store;

pub use commands::run_config_command;
pub use editor::{
    ContextChange, ContextEditor, CurrentContextPolicy, DeleteOutcome, FirstByName, PruneReport,
};
pub use graph::{DanglingReference, ReferenceKind};
pub use models::{AuthInfo, Cluster, ConfigGraph, Context};
pub use resolve::resolve_kubeconfig_path;
pub use store::KubeConfigStore;
