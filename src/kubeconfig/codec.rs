//! Kubeconfig YAML encoding and decoding
//!
//! On disk every collection is a list of `{name, <body>}` entries; in memory
//! they are name-keyed maps. Decoding rejects duplicate names. Encoding
//! writes top-level keys and every collection in ascending name order,
//! which matches what kubectl writes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yml::Value;
use std::collections::BTreeMap;

use log::debug;

use crate::config::document;
use crate::error::{KcfgError, Result};

use super::models::{AuthInfo, Cluster, ConfigGraph, Context};

#[derive(Serialize, Deserialize)]
struct NamedCluster {
    #[serde(default)]
    cluster: Option<Cluster>,
    name: String,
}

#[derive(Serialize, Deserialize)]
struct NamedContext {
    #[serde(default)]
    context: Option<Context>,
    name: String,
}

#[derive(Serialize, Deserialize)]
struct NamedAuthInfo {
    name: String,
    #[serde(default)]
    user: Option<AuthInfo>,
}

/// Parse a kubeconfig document. Empty input yields an empty graph.
pub fn decode(text: &str) -> Result<ConfigGraph> {
    if text.trim().is_empty() {
        return Ok(ConfigGraph::default());
    }

    let mut raw: BTreeMap<String, Value> =
        match serde_yml::from_str::<Option<BTreeMap<String, Value>>>(text)? {
            Some(raw) => raw,
            None => return Ok(ConfigGraph::default()),
        };

    let clusters = index_by_name(
        document::CLUSTERS_KEY,
        take_section::<NamedCluster>(&mut raw, document::CLUSTERS_KEY)?
            .into_iter()
            .map(|entry| (entry.name, entry.cluster.unwrap_or_default())),
    )?;
    let contexts = index_by_name(
        document::CONTEXTS_KEY,
        take_section::<NamedContext>(&mut raw, document::CONTEXTS_KEY)?
            .into_iter()
            .map(|entry| (entry.name, entry.context.unwrap_or_default())),
    )?;
    let auth_infos = index_by_name(
        document::USERS_KEY,
        take_section::<NamedAuthInfo>(&mut raw, document::USERS_KEY)?
            .into_iter()
            .map(|entry| (entry.name, entry.user.unwrap_or_default())),
    )?;

    let current_context = match raw.remove(document::CURRENT_CONTEXT_KEY) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(KcfgError::Parse(format!(
                "'{}' must be a string, got {:?}",
                document::CURRENT_CONTEXT_KEY,
                other
            )))
        }
    };

    debug!(
        "Decoded kubeconfig: {} cluster(s), {} context(s), {} user(s), current-context='{}'",
        clusters.len(),
        contexts.len(),
        auth_infos.len(),
        current_context
    );

    Ok(ConfigGraph {
        clusters,
        auth_infos,
        contexts,
        current_context,
        extra: raw,
    })
}

/// Build the top-level document mapping for a graph
pub fn to_document(graph: &ConfigGraph) -> Result<BTreeMap<String, Value>> {
    let clusters: Vec<NamedCluster> = graph
        .clusters
        .iter()
        .map(|(name, cluster)| NamedCluster {
            cluster: Some(cluster.clone()),
            name: name.clone(),
        })
        .collect();
    let contexts: Vec<NamedContext> = graph
        .contexts
        .iter()
        .map(|(name, context)| NamedContext {
            context: Some(context.clone()),
            name: name.clone(),
        })
        .collect();
    let users: Vec<NamedAuthInfo> = graph
        .auth_infos
        .iter()
        .map(|(name, user)| NamedAuthInfo {
            name: name.clone(),
            user: Some(user.clone()),
        })
        .collect();

    let mut raw = graph.extra.clone();
    raw.insert(
        document::CLUSTERS_KEY.to_string(),
        serde_yml::to_value(clusters)?,
    );
    raw.insert(
        document::CONTEXTS_KEY.to_string(),
        serde_yml::to_value(contexts)?,
    );
    raw.insert(
        document::USERS_KEY.to_string(),
        serde_yml::to_value(users)?,
    );
    raw.insert(
        document::CURRENT_CONTEXT_KEY.to_string(),
        Value::String(graph.current_context.clone()),
    );
    Ok(raw)
}

/// Serialize a graph back into kubeconfig YAML
pub fn encode(graph: &ConfigGraph) -> Result<String> {
    let raw = to_document(graph)?;
    Ok(serde_yml::to_string(&raw)?)
}

fn take_section<T: DeserializeOwned>(
    raw: &mut BTreeMap<String, Value>,
    key: &str,
) -> Result<Vec<T>> {
    match raw.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_yml::from_value(value)
            .map_err(|e| KcfgError::Parse(format!("Invalid '{}' section: {}", key, e))),
    }
}

fn index_by_name<T>(
    section: &str,
    entries: impl IntoIterator<Item = (String, T)>,
) -> Result<BTreeMap<String, T>> {
    let mut indexed = BTreeMap::new();
    for (name, entry) in entries {
        if indexed.contains_key(&name) {
            return Err(KcfgError::Parse(format!(
                "Duplicate name '{}' in '{}'",
                name, section
            )));
        }
        indexed.insert(name, entry);
    }
    Ok(indexed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubeconfig::ContextEditor;

    const BASIC: &str = include_str!("../../tests/fixtures/basic.yaml");
    const WITH_EXTRA_CLUSTER: &str = include_str!("../../tests/fixtures/with_extra_cluster.yaml");
    const WITH_EXTRA_AUTH_INFO: &str =
        include_str!("../../tests/fixtures/with_extra_auth_info.yaml");
    const WITH_EXTRA_CONTEXT: &str = include_str!("../../tests/fixtures/with_extra_context.yaml");
    const WITH_SHARED_REFERENCES: &str =
        include_str!("../../tests/fixtures/with_shared_references.yaml");
    const SHARED_REFERENCES_AFTER_DELETE: &str =
        include_str!("../../tests/fixtures/shared_references_after_delete.yaml");

    #[test]
    fn test_decode_basic() {
        let graph = decode(BASIC).unwrap();

        assert_eq!(graph.current_context, "minikube");
        assert_eq!(graph.clusters.len(), 1);
        assert_eq!(graph.auth_infos.len(), 1);
        assert_eq!(graph.contexts["minikube"], Context::new("minikube", "minikube"));
        assert_eq!(
            graph.clusters["minikube"].attributes.get("server"),
            Some(&Value::String("https://172.17.0.48:8443".to_string()))
        );
        assert_eq!(
            graph.auth_infos["minikube"].attributes.get("client-key"),
            Some(&Value::String("/home/dev/.minikube/client.key".to_string()))
        );
        assert!(graph.extra.contains_key("apiVersion"));
        assert!(graph.extra.contains_key("kind"));
        assert!(graph.extra.contains_key("preferences"));
        assert!(!graph.extra.contains_key("clusters"));
    }

    #[test]
    fn test_decode_empty_document() {
        assert_eq!(decode("").unwrap(), ConfigGraph::default());
        assert_eq!(decode("  \n").unwrap(), ConfigGraph::default());
    }

    #[test]
    fn test_decode_missing_sections() {
        let graph = decode("apiVersion: v1\nkind: Config\n").unwrap();
        assert!(graph.is_empty());
        assert!(graph.current_context.is_empty());
    }

    #[test]
    fn test_decode_null_sections() {
        let graph = decode("clusters: null\ncontexts:\nusers: ~\ncurrent-context: \"\"\n").unwrap();
        assert!(graph.is_empty());
        assert!(graph.current_context.is_empty());
    }

    #[test]
    fn test_decode_rejects_duplicate_cluster_names() {
        let yaml = "clusters:\n- name: a\n  cluster: {}\n- name: a\n  cluster: {}\n";
        let err = decode(yaml).unwrap_err();
        assert!(matches!(err, KcfgError::Parse(_)));
        assert!(err.to_string().contains("Duplicate name 'a' in 'clusters'"));
    }

    #[test]
    fn test_decode_rejects_duplicate_user_names() {
        let yaml = "users:\n- name: u\n  user: {}\n- name: u\n  user: {}\n";
        let err = decode(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate name 'u' in 'users'"));
    }

    #[test]
    fn test_decode_rejects_duplicate_context_names() {
        let yaml = "contexts:\n- name: c\n  context: {cluster: a, user: b}\n- name: c\n  context: {cluster: a, user: b}\n";
        let err = decode(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate name 'c' in 'contexts'"));
    }

    #[test]
    fn test_decode_rejects_malformed_yaml() {
        let err = decode("clusters: [unclosed").unwrap_err();
        assert!(matches!(err, KcfgError::Parse(_)));
    }

    #[test]
    fn test_decode_rejects_entry_without_name() {
        let err = decode("clusters:\n- cluster: {server: x}\n").unwrap_err();
        assert!(err.to_string().contains("Invalid 'clusters' section"));
    }

    #[test]
    fn test_decode_rejects_non_string_current_context() {
        let err = decode("current-context: [a, b]\n").unwrap_err();
        assert!(err.to_string().contains("current-context"));
    }

    #[test]
    fn test_encode_sorts_collections_by_name() {
        let graph = decode(WITH_EXTRA_AUTH_INFO).unwrap();
        let yaml = encode(&graph).unwrap();

        let extra = yaml.find("- name: extra_minikube").unwrap();
        let minikube = yaml.find("- name: minikube").unwrap();
        assert!(extra < minikube);
    }

    #[test]
    fn test_encode_orders_top_level_keys() {
        let yaml = encode(&decode(BASIC).unwrap()).unwrap();
        let positions: Vec<usize> = [
            "apiVersion:",
            "clusters:",
            "contexts:",
            "current-context:",
            "kind:",
            "preferences:",
            "users:",
        ]
        .iter()
        .map(|key| yaml.find(key).unwrap())
        .collect();

        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_roundtrip_preserves_opaque_fields() {
        let yaml = "\
apiVersion: v1
kind: Config
preferences:
  colors: true
extensions:
- name: custom
  extension: {foo: bar}
clusters:
- name: prod
  cluster:
    server: https://prod.example.com
    insecure-skip-tls-verify: true
    certificate-authority-data: LS0tLS1CRUdJTg==
contexts:
- name: prod
  context:
    cluster: prod
    user: admin
    namespace: payments
    extensions:
    - name: note
      extension: {owner: team-a}
users:
- name: admin
  user:
    token: abc123
    exec:
      command: aws
      args: [eks, get-token]
current-context: prod
";
        let graph = decode(yaml).unwrap();
        let reparsed = decode(&encode(&graph).unwrap()).unwrap();
        assert_eq!(reparsed, graph);

        assert_eq!(graph.contexts["prod"].namespace.as_deref(), Some("payments"));
        assert!(graph.contexts["prod"].extra.contains_key("extensions"));
        assert!(graph.extra.contains_key("extensions"));
        let keys: Vec<&str> = graph.clusters["prod"]
            .attributes
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["server", "insecure-skip-tls-verify", "certificate-authority-data"]
        );
    }

    #[test]
    fn test_encode_is_stable() {
        let once = encode(&decode(WITH_SHARED_REFERENCES).unwrap()).unwrap();
        let twice = encode(&decode(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_to_document_always_has_current_context() {
        let document = to_document(&ConfigGraph::default()).unwrap();
        assert_eq!(
            document.get("current-context"),
            Some(&Value::String(String::new()))
        );
        assert!(document.contains_key("clusters"));
        assert!(document.contains_key("contexts"));
        assert!(document.contains_key("users"));
    }

    #[test]
    fn test_delete_absent_context_leaves_encoding_unchanged() {
        let mut graph = decode(WITH_EXTRA_CONTEXT).unwrap();
        let before = encode(&graph).unwrap();

        ContextEditor::new(&mut graph).delete_context("does-not-exist");

        assert_eq!(encode(&graph).unwrap(), before);
    }

    #[test]
    fn test_delete_extra_context_yields_basic() {
        let mut graph = decode(WITH_EXTRA_CONTEXT).unwrap();
        ContextEditor::new(&mut graph).delete_context_and_prune("extra_minikube");
        assert_eq!(graph, decode(BASIC).unwrap());
        assert_eq!(encode(&graph).unwrap(), BASIC);
    }

    #[test]
    fn test_delete_with_shared_references() {
        let mut graph = decode(WITH_SHARED_REFERENCES).unwrap();
        ContextEditor::new(&mut graph).delete_context_and_prune("extra_minikube");

        let expected = decode(SHARED_REFERENCES_AFTER_DELETE).unwrap();
        assert_eq!(graph, expected);

        let yaml = encode(&graph).unwrap();
        assert_eq!(yaml, SHARED_REFERENCES_AFTER_DELETE);
        let extra = yaml.find("name: extra_minikube").unwrap();
        let minikube = yaml.find("name: minikube").unwrap();
        assert!(extra < minikube);
        assert!(yaml.contains("current-context: minikube"));
    }

    #[test]
    fn test_remove_orphans_extra_cluster() {
        let mut graph = decode(WITH_EXTRA_CLUSTER).unwrap();
        let report = ContextEditor::new(&mut graph).remove_orphans();
        assert_eq!(report.clusters, vec!["extra_minikube"]);
        assert!(report.auth_infos.is_empty());
        assert_eq!(graph, decode(BASIC).unwrap());
        assert_eq!(encode(&graph).unwrap(), BASIC);
    }

    #[test]
    fn test_remove_orphans_extra_auth_info() {
        let mut graph = decode(WITH_EXTRA_AUTH_INFO).unwrap();
        let report = ContextEditor::new(&mut graph).remove_orphans();
        assert!(report.clusters.is_empty());
        assert_eq!(report.auth_infos, vec!["extra_minikube"]);
        assert_eq!(graph, decode(BASIC).unwrap());
        assert_eq!(encode(&graph).unwrap(), BASIC);
    }
}
