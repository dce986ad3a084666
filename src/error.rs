use std::fmt;

/// Custom error type for kubeconfig operations
#[derive(Debug)]
pub enum KcfgError {
    /// Reading or writing the kubeconfig file failed
    Io {
        message: String,
        source: std::io::Error,
    },
    /// Document is not well-formed or violates structural constraints
    Parse(String),
    /// JSON serialization error
    Json(String),
    /// Configuration error
    Config(String),
}

impl KcfgError {
    /// Wrap an I/O error with a message naming the operation and path
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        KcfgError::Io {
            message: message.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, KcfgError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

impl fmt::Display for KcfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KcfgError::Io { message, source } => write!(f, "{}: {}", message, source),
            KcfgError::Parse(msg) => write!(f, "Parse error: {}", msg),
            KcfgError::Json(msg) => write!(f, "JSON error: {}", msg),
            KcfgError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for KcfgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KcfgError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KcfgError {
    fn from(err: std::io::Error) -> Self {
        KcfgError::io("I/O error", err)
    }
}

impl From<serde_yml::Error> for KcfgError {
    fn from(err: serde_yml::Error) -> Self {
        KcfgError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for KcfgError {
    fn from(err: serde_json::Error) -> Self {
        KcfgError::Json(err.to_string())
    }
}

/// Result type alias for kubeconfig operations
pub type Result<T> = std::result::Result<T, KcfgError>;
