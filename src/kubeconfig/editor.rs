//! Mutations over a [`ConfigGraph`]: deleting contexts, re-selecting the
//! current context and pruning clusters/users no context references.
//!
//! Every operation here is total except the ones that take a user-supplied
//! target that must exist (`use_context`, creating a context without both
//! references).

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::error::{KcfgError, Result};

use super::models::{ConfigGraph, Context};

/// Picks the new current-context after the active one was deleted
pub trait CurrentContextPolicy {
    /// Choose one of `remaining`, or `None` to leave current-context unset.
    /// `remaining` is never empty when this is called.
    fn select(&self, remaining: &BTreeSet<&str>) -> Option<String>;
}

/// Default policy: the lexicographically smallest remaining name
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstByName;

impl CurrentContextPolicy for FirstByName {
    fn select(&self, remaining: &BTreeSet<&str>) -> Option<String> {
        remaining.iter().next().map(|name| name.to_string())
    }
}

impl<F> CurrentContextPolicy for F
where
    F: Fn(&BTreeSet<&str>) -> Option<String>,
{
    fn select(&self, remaining: &BTreeSet<&str>) -> Option<String> {
        self(remaining)
    }
}

/// Entries removed by an orphan-removal pass, in ascending name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub clusters: Vec<String>,
    pub auth_infos: Vec<String>,
}

impl PruneReport {
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.auth_infos.is_empty()
    }

    pub fn total(&self) -> usize {
        self.clusters.len() + self.auth_infos.len()
    }
}

/// Result of [`ContextEditor::delete_context_and_prune`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOutcome {
    /// The removed context, `None` if the name was not present
    pub removed: Option<Context>,
    pub pruned: PruneReport,
}

/// Whether `set_context` created a new entry or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextChange {
    Created,
    Updated,
}

/// Applies consistency-preserving edits to a borrowed [`ConfigGraph`]
pub struct ContextEditor<'a, P = FirstByName> {
    graph: &'a mut ConfigGraph,
    policy: P,
}

impl<'a> ContextEditor<'a, FirstByName> {
    pub fn new(graph: &'a mut ConfigGraph) -> Self {
        Self::with_policy(graph, FirstByName)
    }
}

impl<'a, P: CurrentContextPolicy> ContextEditor<'a, P> {
    /// Create an editor with a custom current-context selection policy
    pub fn with_policy(graph: &'a mut ConfigGraph, policy: P) -> Self {
        Self { graph, policy }
    }

    /// Remove a context. Absent names are a no-op.
    ///
    /// When the removed context was the current one, current-context is
    /// re-selected among the remaining contexts (or cleared if none remain).
    /// Clusters and users are left alone; see [`Self::remove_orphans`].
    pub fn delete_context(&mut self, name: &str) -> Option<Context> {
        let removed = match self.graph.contexts.remove(name) {
            Some(ctx) => ctx,
            None => {
                debug!("Context '{}' not present, nothing to delete", name);
                return None;
            }
        };
        info!("Deleted context '{}'", name);

        if self.graph.current_context == name {
            let next = self.reselect_current_context();
            match &next {
                Some(next) => info!("Current context '{}' deleted, switched to '{}'", name, next),
                None => info!("Current context '{}' deleted, no contexts remain", name),
            }
            self.graph.current_context = next.unwrap_or_default();
        }

        Some(removed)
    }

    fn reselect_current_context(&self) -> Option<String> {
        let remaining = self.graph.remaining_context_names();
        let first = remaining.iter().next()?.to_string();

        match self.policy.select(&remaining) {
            Some(choice) if remaining.contains(choice.as_str()) => Some(choice),
            Some(choice) => {
                warn!(
                    "Selection policy chose unknown context '{}', using '{}'",
                    choice, first
                );
                Some(first)
            }
            None => None,
        }
    }

    /// Remove every cluster and user that no context references.
    ///
    /// Contexts are never touched, including ones whose references dangle.
    /// Running this twice in a row removes nothing the second time.
    pub fn remove_orphans(&mut self) -> PruneReport {
        let reachable_clusters: BTreeSet<String> = self
            .graph
            .referenced_cluster_names()
            .into_iter()
            .map(String::from)
            .collect();
        let reachable_users: BTreeSet<String> = self
            .graph
            .referenced_auth_info_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut report = PruneReport::default();
        self.graph.clusters.retain(|name, _| {
            let keep = reachable_clusters.contains(name);
            if !keep {
                report.clusters.push(name.clone());
            }
            keep
        });
        self.graph.auth_infos.retain(|name, _| {
            let keep = reachable_users.contains(name);
            if !keep {
                report.auth_infos.push(name.clone());
            }
            keep
        });

        for name in &report.clusters {
            info!("Removed orphaned cluster '{}'", name);
        }
        for name in &report.auth_infos {
            info!("Removed orphaned user '{}'", name);
        }
        report
    }

    /// Delete a context and then prune whatever it left unreferenced
    pub fn delete_context_and_prune(&mut self, name: &str) -> DeleteOutcome {
        let removed = self.delete_context(name);
        let pruned = self.remove_orphans();
        DeleteOutcome { removed, pruned }
    }

    /// Create or update a context.
    ///
    /// Updating merges: only the references provided are changed. Creating
    /// requires both. The first context added to a document without
    /// contexts becomes current.
    pub fn set_context(
        &mut self,
        name: &str,
        cluster: Option<&str>,
        user: Option<&str>,
    ) -> Result<ContextChange> {
        if let Some(existing) = self.graph.contexts.get_mut(name) {
            if let Some(cluster) = cluster {
                existing.cluster = cluster.to_string();
            }
            if let Some(user) = user {
                existing.user = user.to_string();
            }
            debug!(
                "Updated context '{}': cluster={}, user={}",
                name, existing.cluster, existing.user
            );
            return Ok(ContextChange::Updated);
        }

        let (cluster, user) = match (cluster, user) {
            (Some(cluster), Some(user)) => (cluster, user),
            _ => {
                return Err(KcfgError::Config(format!(
                    "--cluster and --user are required when creating a new context. Usage:\n  \
                     kcfgctl set-context {} --cluster <CLUSTER> --user <USER>",
                    name
                )))
            }
        };

        let was_empty = self.graph.contexts.is_empty();
        self.graph
            .contexts
            .insert(name.to_string(), Context::new(cluster, user));
        if was_empty {
            self.graph.current_context = name.to_string();
        }
        debug!(
            "Created context '{}': cluster={}, user={}",
            name, cluster, user
        );
        Ok(ContextChange::Created)
    }

    /// Make `name` the current context
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if !self.graph.contexts.contains_key(name) {
            return Err(KcfgError::Config(format!(
                "Context '{}' not found. Available contexts: {}",
                name,
                self.graph
                    .contexts
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        self.graph.current_context = name.to_string();
        Ok(())
    }
}
