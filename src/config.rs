use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "full_test_results.log";
pub const DEFAULT_EXPORT_PATH: &str = "error_analysis.json";
pub const DEFAULT_EXAMPLE_LIMIT: usize = 5;
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_file: PathBuf,
    pub export_path: PathBuf,
    pub example_limit: usize,
    pub export_write_attempts: u32,
    pub taxonomy_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_file = lookup("LOG_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let export_path = lookup("EXPORT_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

        let example_limit = lookup("EXAMPLE_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXAMPLE_LIMIT);

        let export_write_attempts = lookup("EXPORT_WRITE_ATTEMPTS")
            .and_then(|v| v.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(DEFAULT_WRITE_ATTEMPTS);

        let taxonomy_file = lookup("TAXONOMY_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            log_file,
            export_path,
            example_limit,
            export_write_attempts,
            taxonomy_file,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub example_limit: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            example_limit: DEFAULT_EXAMPLE_LIMIT,
            show_progress: false,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            example_limit: config.example_limit,
            show_progress: false,
        }
    }
}
