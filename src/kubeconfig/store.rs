//! Kubeconfig file I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::kubeconfig as kubeconfig_config;
use crate::error::{KcfgError, Result};

use super::codec;
use super::models::ConfigGraph;

/// Handles reading and writing a kubeconfig file
#[derive(Debug, Clone)]
pub struct KubeConfigStore {
    config_path: PathBuf,
    strict: bool,
}

impl KubeConfigStore {
    /// Create a store for the given kubeconfig path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            strict: false,
        }
    }

    /// Reject documents with dangling context references on load
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load and decode the kubeconfig. A missing file is an error.
    pub fn load(&self) -> Result<ConfigGraph> {
        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            KcfgError::io(
                format!("Failed to read kubeconfig {}", self.config_path.display()),
                e,
            )
        })?;

        let graph = codec::decode(&content).map_err(|e| match e {
            KcfgError::Parse(msg) => KcfgError::Parse(format!(
                "Failed to parse kubeconfig {}: {}",
                self.config_path.display(),
                msg
            )),
            other => other,
        })?;
        debug!("Loaded kubeconfig from {}", self.config_path.display());

        let dangling = graph.dangling_references();
        if !dangling.is_empty() {
            if self.strict {
                return Err(KcfgError::Config(format!(
                    "Kubeconfig {} has dangling references:\n  {}",
                    self.config_path.display(),
                    dangling
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n  ")
                )));
            }
            for reference in &dangling {
                warn!("{}", reference);
            }
        }

        Ok(graph)
    }

    /// Like [`Self::load`], but a missing file yields a new empty document
    pub fn load_or_default(&self) -> Result<ConfigGraph> {
        match self.load() {
            Err(e) if e.is_not_found() => {
                debug!(
                    "Kubeconfig {} does not exist, starting from an empty document",
                    self.config_path.display()
                );
                Ok(ConfigGraph::new())
            }
            other => other,
        }
    }

    /// Save the kubeconfig to disk.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    pub fn save(&self, graph: &ConfigGraph) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    KcfgError::io(
                        format!("Failed to create config directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let yaml = codec::encode(graph)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &yaml).map_err(|e| {
            KcfgError::io(
                format!("Failed to write temp config file {}", tmp_path.display()),
                e,
            )
        })?;

        if let Err(e) = self.replace_with(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        debug!("Saved kubeconfig to {}", self.config_path.display());
        Ok(())
    }

    /// Restrict the temp file to the owner and move it over the kubeconfig
    fn replace_with(&self, tmp_path: &Path) -> Result<()> {
        // Kubeconfigs carry credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(tmp_path, permissions).map_err(|e| {
                KcfgError::io("Failed to set permissions on config file", e)
            })?;
        }

        fs::rename(tmp_path, &self.config_path).map_err(|e| {
            KcfgError::io(
                format!(
                    "Failed to rename temp config file to {}",
                    self.config_path.display()
                ),
                e,
            )
        })
    }

    /// Copy the kubeconfig to `dest` and return a store for the copy
    pub fn copy_to(&self, dest: PathBuf) -> Result<KubeConfigStore> {
        fs::copy(&self.config_path, &dest).map_err(|e| {
            KcfgError::io(
                format!(
                    "Failed to copy kubeconfig {} to {}",
                    self.config_path.display(),
                    dest.display()
                ),
                e,
            )
        })?;
        debug!(
            "Copied kubeconfig {} to {}",
            self.config_path.display(),
            dest.display()
        );
        Ok(KubeConfigStore {
            config_path: dest,
            strict: self.strict,
        })
    }

    /// `<file>.tmp` next to the kubeconfig
    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self
            .config_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| kubeconfig_config::FILE_NAME.into());
        file_name.push(".");
        file_name.push(kubeconfig_config::TMP_EXTENSION);
        self.config_path.with_file_name(file_name)
    }
}
