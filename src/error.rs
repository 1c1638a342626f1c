use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Log file not found: {}", .0.display())]
    LogNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid taxonomy: {0}")]
    Taxonomy(String),

    #[error("Failed to write export to {}: {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Io(e) | Error::ExportWrite { source: e, .. } => is_transient_io(e),
            _ => false,
        }
    }
}

/// IO failures that can clear up between attempts. Permission and
/// not-found style errors will fail the same way every time.
fn is_transient_io(e: &std::io::Error) -> bool {
    use std::io::ErrorKind;

    matches!(
        e.kind(),
        ErrorKind::Interrupted
            | ErrorKind::WouldBlock
            | ErrorKind::TimedOut
            | ErrorKind::WriteZero
    )
}
