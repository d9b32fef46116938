// Error kinds for the credential cache.
//
// Reading and writing fail differently on purpose: a config file that cannot
// be read is reported and then treated as empty, while a failed write aborts
// the current operation.

use std::path::PathBuf;

/// Result type for config store and token lifecycle operations
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors raised while loading, refreshing or persisting the cached token
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Failed to read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write config file {}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt failed")]
    PromptAborted(#[source] std::io::Error),

    #[error("{0} environment variable not found")]
    MissingEnvironment(&'static str),
}

impl CredentialError {
    /// Whether the caller may carry on with an empty config.
    pub fn is_soft(&self) -> bool {
        matches!(self, CredentialError::ConfigRead { .. })
    }
}
