pub mod config;
pub mod error;
pub mod models;
pub mod taxonomy;
pub mod analysis;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use taxonomy::{Classifier, TaxonomyConfig};
pub use analysis::{read_log, Analysis, AnalysisPipeline, Reporter};
pub use storage::ExportWriter;
