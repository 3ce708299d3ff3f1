//! repodata-tools: package header to repository metadata extractor
//!
//! Reads package headers (binary blobs or JSON/YAML dumps) and writes
//! normalized records or `filelists` metadata.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repodata_tools::{
    cli::{self, DumpFormat},
    config::{AppConfig, ConfigPreset},
    pipeline::OutputFormat,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repodata-tools")]
#[command(version)]
#[command(about = "Extract repository metadata from package headers", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Normalized records as JSON
    repodata-tools extract bash.hdr zsh.yaml

    # filelists fragment with primary files only, full changelog
    repodata-tools extract headers/*.hdr -o filelists --primary-only --changelog-limit -1

    # Inspect a binary header
    repodata-tools dump bash.hdr")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `extract` subcommand
#[derive(Parser)]
struct ExtractArgs {
    /// Header blobs (.hdr) or JSON/YAML header dumps
    #[arg(required = true)]
    headers: Vec<PathBuf>,

    /// Output format
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Start from a named preset (default, full, minimal)
    #[arg(long)]
    preset: Option<String>,

    /// Changelog entries to keep per package (-1 keeps all)
    #[arg(long, allow_hyphen_values = true)]
    changelog_limit: Option<i64>,

    /// Load the header id
    #[arg(long)]
    header_id: bool,

    /// Load signature blobs
    #[arg(long)]
    signatures: bool,

    /// Interpreter prefix for requirement collapsing (empty disables it)
    #[arg(long)]
    interpreter_prefix: Option<String>,

    /// Extra primary path pattern (repeatable)
    #[arg(long = "primary-pattern")]
    primary_patterns: Vec<String>,

    /// List only primary files in file lists
    #[arg(long)]
    primary_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract normalized records from package headers
    Extract(ExtractArgs),

    /// Print a header as a JSON/YAML dump
    Dump {
        /// Header blob or dump
        header: PathBuf,

        /// Dump format
        #[arg(short, long, default_value = "yaml")]
        format: DumpFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Encode a header dump into a binary header blob
    Encode {
        /// Header dump (JSON or YAML)
        dump: PathBuf,

        /// Output blob path
        #[arg(short = 'O', long)]
        output_file: PathBuf,
    },

    /// Print the JSON Schema of the config file or the record document
    Schema {
        /// Print the record document schema instead of the config schema
        #[arg(long)]
        record: bool,

        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Write a commented example config to the current directory
    Init,
}

impl ExtractArgs {
    /// CLI values as a config layer over the file config.
    fn overrides(&self) -> Result<AppConfig> {
        let base = match &self.preset {
            Some(name) => {
                let preset = ConfigPreset::from_name(name)
                    .with_context(|| format!("unknown preset '{name}'"))?;
                AppConfig::from_preset(preset)
            }
            None => AppConfig::default(),
        };

        let mut builder = AppConfig::builder()
            .changelog_limit(self.changelog_limit.unwrap_or(base.extract.changelog_limit))
            .load_header_id(self.header_id || base.extract.load_header_id)
            .load_signatures(self.signatures || base.extract.load_signatures)
            .output_format(self.output.unwrap_or_default())
            .output_file(self.output_file.clone())
            .primary_only(self.primary_only);
        if let Some(prefix) = &self.interpreter_prefix {
            builder = builder.interpreter_prefix(prefix.clone());
        }
        for pattern in &self.primary_patterns {
            builder = builder.primary_pattern(pattern.clone());
        }
        Ok(builder.build())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Extract(args) => {
            let overrides = args.overrides()?;
            let (config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            cli::run_extract(&args.headers, &config)
        }

        Commands::Dump {
            header,
            format,
            output_file,
        } => cli::run_dump(&header, format, output_file),

        Commands::Encode { dump, output_file } => cli::run_encode(&dump, &output_file),

        Commands::Schema { record, output } => {
            let schema = if record {
                repodata_tools::config::generate_record_schema()
            } else {
                repodata_tools::config::generate_json_schema()
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    repodata_tools::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("repodata-tools").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                match repodata_tools::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".repodata-tools.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = repodata_tools::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
