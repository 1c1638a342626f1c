pub mod export;

pub use export::ExportWriter;
