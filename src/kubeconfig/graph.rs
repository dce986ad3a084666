//! Reachability queries over the context -> cluster/user reference graph

use std::collections::BTreeSet;
use std::fmt;

use super::models::ConfigGraph;

/// Which collection a context reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReferenceKind {
    Cluster,
    AuthInfo,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Cluster => write!(f, "cluster"),
            ReferenceKind::AuthInfo => write!(f, "user"),
        }
    }
}

/// A context reference naming a cluster or user that is not in the document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingReference {
    pub context: String,
    pub kind: ReferenceKind,
    pub name: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "context '{}' references missing {} '{}'",
            self.context, self.kind, self.name
        )
    }
}

impl ConfigGraph {
    /// Cluster names referenced by at least one context
    pub fn referenced_cluster_names(&self) -> BTreeSet<&str> {
        self.contexts.values().map(|ctx| ctx.cluster.as_str()).collect()
    }

    /// User names referenced by at least one context
    pub fn referenced_auth_info_names(&self) -> BTreeSet<&str> {
        self.contexts.values().map(|ctx| ctx.user.as_str()).collect()
    }

    pub fn remaining_context_names(&self) -> BTreeSet<&str> {
        self.contexts.keys().map(String::as_str).collect()
    }

    /// Context references to clusters or users absent from the document,
    /// ordered by context name.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for (name, ctx) in &self.contexts {
            if !self.clusters.contains_key(&ctx.cluster) {
                dangling.push(DanglingReference {
                    context: name.clone(),
                    kind: ReferenceKind::Cluster,
                    name: ctx.cluster.clone(),
                });
            }
            if !self.auth_infos.contains_key(&ctx.user) {
                dangling.push(DanglingReference {
                    context: name.clone(),
                    kind: ReferenceKind::AuthInfo,
                    name: ctx.user.clone(),
                });
            }
        }
        dangling
    }
}
