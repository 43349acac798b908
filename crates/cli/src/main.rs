use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use eventdoc_extractor::{Extractor, ExtractorConfig};
use std::fs;
use std::path::{Path, PathBuf};

mod generate;
mod report;

#[derive(Parser)]
#[command(name = "eventdoc")]
#[command(about = "Generate documentation for C# EventSource events", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one CSV per EventSource class found in the given sources
    Generate(GenerateArgs),

    /// Print the events of a single file as JSON
    Inspect(InspectArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Source files, relative to --project
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Project directory the sources are relative to
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// Directory receiving the generated CSV files
    #[arg(long)]
    output: PathBuf,

    /// TOML file overriding marker/attribute/section names
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append Keywords, Task, Opcode, Channel, Message and Version columns
    #[arg(long)]
    extended: bool,

    /// Exit with an error when any file fails
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// C# source file
    file: PathBuf,

    /// TOML file overriding marker/attribute/section names
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let extractor = build_extractor(args.config.as_deref())?;
    let summary = generate::run(
        &extractor,
        &args.project,
        &args.output,
        &args.sources,
        args.extended,
    )?;

    log::info!(
        "Generated {} file(s), skipped {}, failed {}",
        summary.generated.len(),
        summary.skipped,
        summary.failed
    );

    if args.strict && summary.failed > 0 {
        bail!("{} source file(s) could not be documented", summary.failed);
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let extractor = build_extractor(args.config.as_deref())?;
    let document = extractor
        .extract_file(&args.file)
        .with_context(|| format!("Failed to extract events from {}", args.file.display()))?;

    if document.is_none() {
        log::info!("No EventSource class in {}", args.file.display());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{json}");
    Ok(())
}

fn build_extractor(config_path: Option<&Path>) -> Result<Extractor> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => ExtractorConfig::default(),
    };
    Extractor::new(config).context("Invalid extractor configuration")
}

fn load_config(path: &Path) -> Result<ExtractorConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
}
