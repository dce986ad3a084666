/// Configuration constants for locating the kubeconfig file
pub mod kubeconfig {
    /// Environment variable holding one or more kubeconfig paths
    pub const ENV_VAR: &str = "KUBECONFIG";

    /// Directory under HOME holding the default kubeconfig
    pub const DIR_NAME: &str = ".kube";

    /// Default kubeconfig file name
    pub const FILE_NAME: &str = "config";

    /// Extension used for the temporary file during atomic saves
    pub const TMP_EXTENSION: &str = "tmp";

    /// Separator between paths in KUBECONFIG
    #[cfg(unix)]
    pub const PATH_LIST_SEPARATOR: char = ':';
    #[cfg(not(unix))]
    pub const PATH_LIST_SEPARATOR: char = ';';
}

/// Well-known top-level document fields
pub mod document {
    pub const API_VERSION_KEY: &str = "apiVersion";
    pub const KIND_KEY: &str = "kind";
    pub const PREFERENCES_KEY: &str = "preferences";

    pub const CLUSTERS_KEY: &str = "clusters";
    pub const CONTEXTS_KEY: &str = "contexts";
    pub const USERS_KEY: &str = "users";
    pub const CURRENT_CONTEXT_KEY: &str = "current-context";

    /// Context entry fields
    pub const CONTEXT_CLUSTER_KEY: &str = "cluster";
    pub const CONTEXT_NAMESPACE_KEY: &str = "namespace";
    pub const CONTEXT_USER_KEY: &str = "user";

    /// Values written when a document is created from scratch
    pub const API_VERSION: &str = "v1";
    pub const KIND: &str = "Config";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
