// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! vannot CLI
//!
//! Resolve a transcript-level HGVS variant to its genomic description and
//! REVEL/SpliceAI scores using VariantValidator and Ensembl VEP.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::util::SubscriberInitExt;

use variant_annotator::cli::{
    clean_input, open_log_file, output_error, output_result, prompt_line, OutputFormat,
    BUILD_PROMPT, VARIANT_PROMPT,
};
use variant_annotator::{Annotator, AnnotatorConfig, GenomeBuild};

#[derive(Parser)]
#[command(name = "vannot")]
#[command(author, version, about = "Coding variant to pathogenicity score annotator")]
#[command(
    long_about = "Validate a transcript-level HGVS variant with VariantValidator, project it \
onto GRCh37 or GRCh38, and annotate the genomic variant with REVEL and SpliceAI scores \
from Ensembl VEP.

Examples:
  vannot annotate 'NM_000088.3:c.589G>T' --build GRCh38
  vannot annotate 'ENST00000225964.10:c.589G>T' --build GRCh37 --format text
  vannot annotate                    # prompts for the variant and build
  vannot --log-level debug --log-file logs/va.log annotate 'NM_000088.3:c.589G>T' -b GRCh37
  vannot config -o vannot.toml
  vannot check --config vannot.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate one variant
    Annotate {
        /// HGVS variant description (prompted for if omitted)
        variant: Option<String>,

        /// Genome build: GRCh37 or GRCh38 (prompted for if omitted)
        #[arg(short, long)]
        build: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the HTTP timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Output format: json or text
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Generate a sample configuration file
    Config {
        /// Output path for configuration file
        #[arg(short, long, default_value = "vannot.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "vannot.toml")]
        config: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Annotate {
            variant,
            build,
            config,
            timeout,
            format,
        } => annotate_command(variant, build, config, timeout, &format).await,
        Commands::Config { output, force } => config_command(output, force),
        Commands::Check { config } => check_command(config),
    }
}

async fn annotate_command(
    variant: Option<String>,
    build: Option<String>,
    config_path: Option<PathBuf>,
    timeout: Option<u64>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: OutputFormat = format.parse()?;

    let mut config = match config_path {
        Some(path) => load_or_default_config(&path)?,
        None => AnnotatorConfig::default(),
    };
    if timeout.is_some() {
        config.http.timeout_seconds = timeout;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt_out = io::stderr();
    let variant = match variant.as_deref().and_then(clean_input) {
        Some(variant) => variant.to_string(),
        None => prompt_line(&mut input, &mut prompt_out, VARIANT_PROMPT)?,
    };
    let build = match build.as_deref().and_then(clean_input) {
        Some(build) => build.to_string(),
        None => prompt_line(&mut input, &mut prompt_out, BUILD_PROMPT)?,
    };

    let annotator = match Annotator::from_config(&config) {
        Ok(annotator) => annotator,
        Err(e) => {
            error!("{}", e.detailed_message());
            std::process::exit(1);
        }
    };

    info!("Annotating {} on {}", variant, build);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match annotator.annotate_variant(&variant, &build).await {
        Ok(result) => {
            output_result(&mut out, &result, format)?;
            out.flush()?;
            Ok(())
        }
        Err(e) => {
            error!("{}", e.detailed_message());
            output_error(&mut io::stderr(), &variant, &e, format)?;
            std::process::exit(1);
        }
    }
}

fn config_command(output_path: PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output_path.exists() && !force {
        eprintln!(
            "Configuration file already exists: {}",
            output_path.display()
        );
        eprintln!("Use --force to overwrite");
        std::process::exit(1);
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    AnnotatorConfig::default().to_file(&output_path)?;

    println!(
        "Sample configuration file created: {}",
        output_path.display()
    );
    println!("Edit the file to point at other VariantValidator or VEP deployments");

    Ok(())
}

fn check_command(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking configuration...");

    let config = load_or_default_config(&config_path)?;

    match config.validate() {
        Ok(()) => println!("Configuration is valid"),
        Err(e) => {
            println!("Configuration validation failed: {}", e);
            return Err(e.into());
        }
    }

    println!("\nEndpoints:");
    println!(
        "  VariantValidator (RefSeq):  {}/{}",
        config.validator.base_url, config.validator.refseq_path
    );
    println!(
        "  VariantValidator (Ensembl): {}/{}",
        config.validator.base_url, config.validator.ensembl_path
    );
    for build in GenomeBuild::ALL {
        let url = match build {
            GenomeBuild::GRCh37 => &config.vep.grch37_url,
            GenomeBuild::GRCh38 => &config.vep.grch38_url,
        };
        println!("  VEP ({}):                {}", build, url);
    }
    println!("  Namespace routing:         {}", config.routing.namespace);
    match config.http.timeout_seconds {
        Some(seconds) => println!("  Timeout:                   {}s", seconds),
        None => println!("  Timeout:                   none"),
    }

    Ok(())
}

fn load_or_default_config(config_path: &Path) -> Result<AnnotatorConfig, Box<dyn std::error::Error>> {
    if config_path.exists() {
        info!("Loading configuration from {}", config_path.display());
        Ok(AnnotatorConfig::from_file(config_path)?)
    } else {
        warn!(
            "Configuration file not found: {}, using defaults",
            config_path.display()
        );
        eprintln!("TIP: Run 'vannot config' to generate a sample configuration file");
        Ok(AnnotatorConfig::default())
    }
}

fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)
                .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    // stdout carries only the result record
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}
