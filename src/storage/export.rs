use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Writes the JSON export, replacing whatever was there before.
pub struct ExportWriter {
    path: PathBuf,
    attempts: u32,
}

impl ExportWriter {
    pub fn new<P: AsRef<Path>>(path: P, attempts: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            attempts: attempts.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Each retry rewrites the whole file from the start.
    pub fn write(&self, contents: &str) -> Result<()> {
        self.write_with(contents, write_file)
    }

    fn write_with<F>(&self, contents: &str, mut write_once: F) -> Result<()>
    where
        F: FnMut(&Path, &str) -> std::io::Result<()>,
    {
        let mut attempt = 1;
        loop {
            let source = match write_once(&self.path, contents) {
                Ok(()) => {
                    tracing::info!("Export written to: {}", self.path.display());
                    return Ok(());
                }
                Err(source) => source,
            };

            let err = Error::ExportWrite {
                path: self.path.clone(),
                source,
            };
            if attempt >= self.attempts || !err.is_retryable() {
                return Err(err);
            }

            tracing::warn!(
                "Export write attempt {}/{} failed: {}",
                attempt,
                self.attempts,
                err
            );
            attempt += 1;
        }
    }
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}
