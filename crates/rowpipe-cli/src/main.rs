//! rowpipe CLI: run linear pipeline files over a delimited text table.

use clap::{Parser, Subcommand, ValueEnum};
use rowpipe_core::config::EngineConfig;
use rowpipe_exec::Engine;
use rowpipe_io::{CsvWriter, JsonlWriter};
use rowpipe_planner::{parse_yaml_pipeline, PipelineConfig};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rowpipe")]
#[command(about = "Run limit/project/filter/sort pipelines over a CSV table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a pipeline and print the result rows
    Run {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,

        /// Input table (overrides the pipeline's `source`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        load: LoadArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Write results to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a pipeline YAML file (parses and builds the operator tree)
    Validate {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },

    /// Show the operator tree for a pipeline (EXPLAIN)
    Explain {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },

    /// Print the effective loader configuration as JSON
    Config {
        #[command(flatten)]
        load: LoadArgs,
    },
}

#[derive(clap::Args, Default)]
struct LoadArgs {
    /// Field delimiter (one character, or `\t`)
    #[arg(long)]
    delimiter: Option<String>,

    /// Skip the first record of the input
    #[arg(long)]
    has_headers: bool,

    /// Trim whitespace around fields
    #[arg(long)]
    trim: bool,

    /// Infer int/float/bool/string tags for loaded cells
    #[arg(long)]
    infer_types: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Jsonl,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            pipeline,
            input,
            load,
            format,
            output,
        } => {
            if let Err(e) = run_pipeline(&pipeline, input, &load, format, output) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { pipeline } => {
            if let Err(e) = validate_pipeline(&pipeline) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Pipeline is valid");
        }
        Commands::Explain { pipeline } => {
            if let Err(e) = explain_pipeline(&pipeline) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Config { load } => {
            if let Err(e) = print_config(&load) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_pipeline(
    pipeline_path: &PathBuf,
    input: Option<PathBuf>,
    load: &LoadArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    let parsed = parse_yaml_pipeline(&yaml_content)?;

    // env < pipeline file < CLI flags
    let engine = Engine::from_env();
    let overrides = load_overrides(load);
    let delimiter = engine.pipeline_config(&parsed, &overrides)?.delimiter;
    let (rows, report) = engine.run_pipeline(&parsed, input.as_deref(), &overrides)?;
    tracing::debug!(elapsed_us = report.elapsed_us, "pipeline done");

    match (format, output) {
        (OutputFormat::Csv, Some(path)) => {
            CsvWriter::to_path(path, delimiter)?.write_rows(&rows)?;
        }
        (OutputFormat::Csv, None) => {
            CsvWriter::to_writer(io::stdout().lock(), delimiter).write_rows(&rows)?;
        }
        (OutputFormat::Jsonl, Some(path)) => {
            JsonlWriter::to_path(path)?.write_rows(&rows)?;
        }
        (OutputFormat::Jsonl, None) => {
            JsonlWriter::to_writer(io::stdout().lock()).write_rows(&rows)?;
        }
    }

    Ok(())
}

fn validate_pipeline(pipeline_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    let parsed = parse_yaml_pipeline(&yaml_content)?;
    parsed.config.apply(&mut EngineConfig::default())?;
    Ok(())
}

fn explain_pipeline(pipeline_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    let parsed = parse_yaml_pipeline(&yaml_content)?;

    println!("Operator Tree");
    println!("=============");
    if let Some(source) = &parsed.source {
        println!("Source: {}", source);
    }
    println!("Operators: {}", parsed.tree.depth());
    println!();
    println!("{}", parsed.tree.explain());
    Ok(())
}

fn print_config(load: &LoadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EngineConfig::from_env();
    load_overrides(load).apply(&mut config)?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

/// Loader flags as the top override layer. Flags only ever switch behavior on.
fn load_overrides(args: &LoadArgs) -> PipelineConfig {
    PipelineConfig {
        delimiter: args.delimiter.clone(),
        has_headers: args.has_headers.then_some(true),
        trim: args.trim.then_some(true),
        infer_types: args.infer_types.then_some(true),
        read_buffer_bytes: None,
    }
}
