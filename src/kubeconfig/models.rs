//! Kubeconfig data models

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yml::{Mapping, Value};
use std::collections::BTreeMap;

use crate::config::document;

/// A cluster entry. The attribute bag (server, certificate-authority, ...)
/// is carried verbatim and never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cluster {
    pub attributes: Mapping,
}

/// A user credential entry (`users[].user` in the document).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthInfo {
    pub attributes: Mapping,
}

/// A named pairing of one cluster and one user, referenced by name only
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Context {
    /// Name of the referenced cluster
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cluster: String,
    /// Default namespace for this context
    #[serde(default)]
    pub namespace: Option<String>,
    /// Name of the referenced user (auth-info)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user: String,
    /// Fields this tool does not interpret (extensions, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// Known and unknown keys are written as one sorted mapping, like kubectl.
impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields: BTreeMap<&str, Value> = self
            .extra
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect();
        fields.insert(
            document::CONTEXT_CLUSTER_KEY,
            Value::String(self.cluster.clone()),
        );
        if let Some(namespace) = &self.namespace {
            fields.insert(
                document::CONTEXT_NAMESPACE_KEY,
                Value::String(namespace.clone()),
            );
        }
        fields.insert(document::CONTEXT_USER_KEY, Value::String(self.user.clone()));
        fields.serialize(serializer)
    }
}

/// An explicit `null` reference reads as an unset one
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Context {
    pub fn new(cluster: &str, user: &str) -> Self {
        Self {
            cluster: cluster.to_string(),
            user: user.to_string(),
            ..Default::default()
        }
    }
}

/// In-memory kubeconfig: three name-keyed collections plus the
/// current-context selector.
///
/// Collections are `BTreeMap`s so iteration, and therefore serialization,
/// is in ascending name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigGraph {
    pub clusters: BTreeMap<String, Cluster>,
    pub auth_infos: BTreeMap<String, AuthInfo>,
    pub contexts: BTreeMap<String, Context>,
    /// Active context name; empty when unset
    pub current_context: String,
    /// Every other top-level field (apiVersion, kind, preferences, ...)
    pub extra: BTreeMap<String, Value>,
}

impl ConfigGraph {
    /// Create an empty document carrying the standard kubeconfig header
    pub fn new() -> Self {
        let mut extra = BTreeMap::new();
        extra.insert(
            document::API_VERSION_KEY.to_string(),
            Value::String(document::API_VERSION.to_string()),
        );
        extra.insert(
            document::KIND_KEY.to_string(),
            Value::String(document::KIND.to_string()),
        );
        extra.insert(
            document::PREFERENCES_KEY.to_string(),
            Value::Mapping(Mapping::new()),
        );
        Self {
            extra,
            ..Default::default()
        }
    }

    /// True when no clusters, users or contexts are present
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.auth_infos.is_empty() && self.contexts.is_empty()
    }

    /// Current context name, or `None` when unset
    pub fn current_context(&self) -> Option<&str> {
        if self.current_context.is_empty() {
            None
        } else {
            Some(&self.current_context)
        }
    }
}
