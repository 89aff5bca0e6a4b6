use std::io;
use thiserror::Error;

/// Custom error type for BVDL
#[derive(Error, Debug)]
pub enum BvdlError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Required tool is not available: {0}")]
    MissingDependency(String),

    #[error("Probe failed for '{tool}': {reason}")]
    Probe { tool: String, reason: String },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Failed to move '{file}' ({moved} file(s) already moved): {source}")]
    Relocation {
        file: String,
        moved: usize,
        #[source]
        source: io::Error,
    },

    #[error("No free name for '{name}' after {attempts} attempts")]
    NameExhausted { name: String, attempts: u32 },
}

/// Result type alias for BVDL
pub type Result<T> = std::result::Result<T, BvdlError>;

impl BvdlError {
    /// Create a missing dependency error
    pub fn missing_dependency<S: Into<String>>(tool: S) -> Self {
        BvdlError::MissingDependency(tool.into())
    }

    pub fn probe<S: Into<String>, R: Into<String>>(tool: S, reason: R) -> Self {
        BvdlError::Probe {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a download failure error
    pub fn download_failed<S: Into<String>>(msg: S) -> Self {
        BvdlError::DownloadFailed(msg.into())
    }
}
