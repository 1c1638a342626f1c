pub mod pipeline;
pub mod reporter;
pub mod segmenter;

pub use pipeline::{read_log, Analysis, AnalysisPipeline};
pub use reporter::Reporter;
pub use segmenter::{segment, Segmentation};
