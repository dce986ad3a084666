//! kcfgctl - Keep kubeconfig files consistent
//!
//! Deletes contexts from a kubeconfig, re-selects the current context when
//! the active one goes away, and prunes clusters and users that no context
//! references anymore.
//!
//! # Example
//!
//! ```bash
//! # Delete a context and everything only it used
//! kcfgctl delete-context extra_minikube
//!
//! # Delete a context but keep its cluster and user entries
//! kcfgctl delete-context extra_minikube --no-prune
//!
//! # Remove clusters and users no context references
//! kcfgctl prune --kubeconfig ./kubeconfig.yaml
//!
//! # Find contexts pointing at missing clusters or users
//! kcfgctl check
//! ```
//!
//! The same operations are available as a library:
//!
//! ```
//! use kcfgctl::kubeconfig::{codec, ContextEditor};
//!
//! let yaml = "\
//! clusters:
//! - name: a
//!   cluster:
//!     server: https://a.example.com
//! - name: b
//!   cluster:
//!     server: https://b.example.com
//! contexts:
//! - name: a
//!   context: {cluster: a, user: dev}
//! - name: b
//!   context: {cluster: b, user: dev}
//! users:
//! - name: dev
//!   user: {token: abc}
//! current-context: b
//! ";
//! let mut graph = codec::decode(yaml).unwrap();
//! let outcome = ContextEditor::new(&mut graph).delete_context_and_prune("b");
//!
//! assert_eq!(graph.current_context, "a");
//! assert_eq!(outcome.pruned.clusters, vec!["b"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod kubeconfig;

pub use cli::{Cli, ConfigAction, OutputFormat};
pub use error::{KcfgError, Result};
pub use kubeconfig::{
    run_config_command, ConfigGraph, ContextEditor, CurrentContextPolicy, KubeConfigStore,
    PruneReport,
};
