use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

use intern_screen::config::{Config, DEFAULT_CONFIG_PATH};
use intern_screen::constants::PREVIEW_ROWS;
use intern_screen::export::{self, ExportFormat};
use intern_screen::logging;
use intern_screen::pipeline::{Pipeline, PipelineResult};
use intern_screen::report::Summary;

#[derive(Parser)]
#[command(name = "intern_screen")]
#[command(about = "Flag likely fake internship postings with a fixed rule set")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Source CSV, overrides the config file
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and export the labeled internships
    Run {
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
        /// Exact output file; defaults to a timestamped file in output_dir
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
    /// Print dashboard aggregates as JSON
    Summary {
        /// Number of fake-title words to list
        #[arg(long)]
        top_words: Option<usize>,
    },
    /// Print the first rows of the labeled table
    Preview {
        #[arg(long, default_value_t = PREVIEW_ROWS)]
        limit: usize,
    },
    /// Show which signals fired for one posting
    Explain { job_id: String },
}

fn run_pipeline(config: &Config) -> anyhow::Result<PipelineResult> {
    let result = Pipeline::new(config)
        .run(&config.source)
        .context("Pipeline failed")?;

    if let Some(cause) = &result.load_failure {
        println!("❌ Failed to load dataset: {cause}");
    } else {
        println!("📥 CSV loaded, rows: {}", result.rows_loaded);
    }
    if result.parse_warnings > 0 {
        warn!("{} salary values could not be parsed", result.parse_warnings);
    }
    Ok(result)
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(source) = cli.source {
        config.source = source;
    }

    logging::init_logging(&config.log_dir);
    info!(source = %config.source.display(), "Starting intern_screen");

    match cli.command {
        Commands::Run { format, output, stdout } => {
            let result = run_pipeline(&config)?;
            let format = ExportFormat::from(format);
            println!(
                "📊 {} internships, {} likely fake",
                result.table.len(),
                result.table.likely_fake_count()
            );

            if stdout {
                export::write_table(&result.table, format, std::io::stdout().lock())?;
            } else if let Some(path) = output {
                export::export_to_path(&result.table, format, &path)?;
                println!("💾 Saved to {}", path.display());
            } else {
                let path = export::export_to_dir(&result.table, format, &config.output_dir)?;
                println!("💾 Saved to {}", path.display());
            }
        }
        Commands::Summary { top_words } => {
            let result = run_pipeline(&config)?;
            let summary = Summary::build(&result.table, top_words.unwrap_or(config.top_words));
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Preview { limit } => {
            let result = run_pipeline(&config)?;
            for row in result.table.head(limit) {
                println!(
                    "{:>8}  {:<40}  {:>10.1}  {}",
                    row.job_id,
                    row.title,
                    row.avg_salary,
                    if row.is_likely_fake() { "fake" } else { "real" }
                );
            }
        }
        Commands::Explain { job_id } => {
            let result = run_pipeline(&config)?;
            match result.explain(&job_id) {
                Some(assessment) if assessment.signals.is_empty() => {
                    println!("✅ {job_id}: no signals fired, likely real");
                }
                Some(assessment) => {
                    println!("⚠️  {job_id}: likely fake");
                    for signal in &assessment.signals {
                        println!("   - {}", signal.describe());
                    }
                }
                None => println!("No internship with job_id {job_id}"),
            }
        }
    }

    Ok(())
}
