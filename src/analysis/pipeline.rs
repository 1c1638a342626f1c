use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::analysis::reporter::Reporter;
use crate::analysis::segmenter::segment;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{Category, FailureRecord, Report};
use crate::taxonomy::Classifier;

/// Everything one run produced, before anything leaves the process.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<FailureRecord>,
    /// `categories[i]` is the category of `records[i]`.
    pub categories: Vec<Category>,
    pub report: Report,
    pub dropped_markers: usize,
}

pub struct AnalysisPipeline {
    classifier: Classifier,
    reporter: Reporter,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(classifier: Classifier, config: PipelineConfig) -> Self {
        Self {
            classifier,
            reporter: Reporter::new(config.example_limit),
            config,
        }
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        // Step 1: Split the log into numbered failures
        let segmentation = segment(text);
        let records = segmentation.records;
        tracing::info!("Found {} failing tests", records.len());

        // Step 2: Classify each failure body
        let categories = self.classify_all(&records);

        // Step 3: Group and count
        let report = self
            .reporter
            .build(records.iter().zip(categories.iter().copied()));

        for group in report.ranked() {
            tracing::debug!("{}: {}", group.category, group.count());
        }

        Analysis {
            records,
            categories,
            report,
            dropped_markers: segmentation.dropped_markers,
        }
    }

    fn classify_all(&self, records: &[FailureRecord]) -> Vec<Category> {
        let pb = if self.config.show_progress {
            ProgressBar::new(records.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} failures")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        let categories = records
            .iter()
            .map(|record| {
                let category = self.classifier.classify(&record.body);
                pb.inc(1);
                category
            })
            .collect();

        pb.finish_and_clear();
        categories
    }
}

/// Reads the whole log into memory.
///
/// A missing file is `Error::LogNotFound`; bytes that are not UTF-8 are
/// replaced rather than rejected.
pub fn read_log<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::LogNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(
                "{} is not valid UTF-8; invalid bytes were replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
