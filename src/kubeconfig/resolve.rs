//! Kubeconfig path resolution from multiple sources

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::kubeconfig as kubeconfig_config;
use crate::error::{KcfgError, Result};

/// Resolve the kubeconfig path from multiple sources:
/// 1. --kubeconfig CLI flag
/// 2. first entry of the KUBECONFIG env var
/// 3. ~/.kube/config
pub fn resolve_kubeconfig_path(cli_path: Option<&Path>) -> Result<PathBuf> {
    resolve_kubeconfig_path_from(
        cli_path,
        std::env::var(kubeconfig_config::ENV_VAR).ok(),
        dirs::home_dir(),
    )
}

fn resolve_kubeconfig_path_from(
    cli_path: Option<&Path>,
    env_value: Option<String>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    // 1. CLI flag
    if let Some(path) = cli_path {
        debug!("Using kubeconfig from CLI flag: {}", path.display());
        return Ok(path.to_path_buf());
    }

    // 2. Environment variable
    if let Some(value) = env_value {
        if let Some(first) = value
            .split(kubeconfig_config::PATH_LIST_SEPARATOR)
            .find(|entry| !entry.is_empty())
        {
            debug!(
                "Using kubeconfig from {} env var: {}",
                kubeconfig_config::ENV_VAR,
                first
            );
            return Ok(PathBuf::from(first));
        }
    }

    // 3. Home directory
    let home = home.ok_or_else(|| {
        KcfgError::Config(format!(
            "Cannot determine home directory. Use --kubeconfig or set {}.",
            kubeconfig_config::ENV_VAR
        ))
    })?;
    let path = home
        .join(kubeconfig_config::DIR_NAME)
        .join(kubeconfig_config::FILE_NAME);
    debug!("Using default kubeconfig: {}", path.display());
    Ok(path)
}
