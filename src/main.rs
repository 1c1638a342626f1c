use chrono::Utc;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use testlog_analyzer::{
    read_log, Analysis, AnalysisPipeline, Classifier, Config, Error, ExportWriter,
    PipelineConfig, TaxonomyConfig,
};

const EXIT_LOG_NOT_FOUND: u8 = 2;
const EXIT_EXPORT_FAILED: u8 = 3;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "testlog-analyzer")]
#[command(version = "0.1.0")]
#[command(about = "Classify failures in a test-run log by root cause")]
struct Args {
    /// Test runner log to analyze (defaults to $LOG_FILE or full_test_results.log)
    log_file: Option<PathBuf>,

    /// Where to write the JSON export (defaults to $EXPORT_PATH or error_analysis.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Examples shown per category in the text summary
    #[arg(long)]
    examples: Option<usize>,

    /// JSON file overriding the selector and marker tables
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Show a progress bar while classifying
    #[arg(long)]
    progress: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("testlog_analyzer=info".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration, CLI wins over environment
    let mut config = Config::from_env();
    if let Some(ref path) = args.log_file {
        config.log_file = path.clone();
    }
    if let Some(ref path) = args.output {
        config.export_path = path.clone();
    }
    if let Some(limit) = args.examples {
        config.example_limit = limit;
    }
    if args.taxonomy.is_some() {
        config.taxonomy_file = args.taxonomy.clone();
    }

    let taxonomy = match config.taxonomy_file {
        Some(ref path) => TaxonomyConfig::from_file(path)?,
        None => TaxonomyConfig::default(),
    };

    let text = match read_log(&config.log_file) {
        Ok(text) => text,
        Err(Error::LogNotFound(path)) => {
            eprintln!("Log file not found: {}", path.display());
            return Ok(ExitCode::from(EXIT_LOG_NOT_FOUND));
        }
        Err(e) => return Err(e.into()),
    };

    let pipeline_config = PipelineConfig {
        show_progress: args.progress,
        ..PipelineConfig::from(&config)
    };
    let pipeline = AnalysisPipeline::new(Classifier::with_config(&taxonomy)?, pipeline_config);

    tracing::info!("Analyzing {}", config.log_file.display());
    let analysis = pipeline.analyze(&text);
    let export = pipeline.reporter().render_export(&analysis.report)?;

    // The summary is already computed, so it is shown even if the export fails.
    match args.format {
        OutputFormat::Text => print!("{}", format_text(&pipeline, &analysis)),
        OutputFormat::Json => print!("{}", export),
    }

    let writer = ExportWriter::new(&config.export_path, config.export_write_attempts);
    if let Err(e) = writer.write(&export) {
        tracing::error!("{}", e);
        eprintln!("Could not save detailed analysis: {}", e);
        return Ok(ExitCode::from(EXIT_EXPORT_FAILED));
    }

    if let OutputFormat::Text = args.format {
        println!("\nDetailed analysis saved to {}", writer.path().display());
    }

    Ok(ExitCode::SUCCESS)
}

fn format_text(pipeline: &AnalysisPipeline, analysis: &Analysis) -> String {
    let mut output = pipeline.reporter().render_summary(&analysis.report);

    if analysis.dropped_markers > 0 {
        output.push_str(&format!(
            "\nWarning: {} failure marker(s) had no title and were skipped\n",
            analysis.dropped_markers
        ));
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
