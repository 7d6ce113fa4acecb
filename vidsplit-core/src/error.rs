use thiserror::Error;

/// Custom error types for vidsplit
#[derive(Error, Debug)]
pub enum VidsplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Timeline error: {0}")]
    Timeline(#[from] crate::timeline::TimelineError),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),

    #[error("Preprocessing error: {0}")]
    Preprocess(#[from] crate::preprocess::PreprocessError),

    #[error("Media file error: {0}")]
    MediaFile(String),

    #[error("Dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("No media session is open")]
    NoSession,

    #[error("Another task is already in flight: {0}")]
    TaskInProgress(String),
}

/// Result type for vidsplit operations
pub type Result<T> = std::result::Result<T, VidsplitError>;
