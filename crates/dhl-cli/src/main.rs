//! # dhl-cli
//!
//! Command-line front end for the DHL shipment mapper.
//!
//! Maps generic shipment request files onto DHL shipment orders, parses
//! label responses and exposes the street splitter for quick checks.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::CliConfig;
use dhl_adapter_xml::{OrderSerializer, parse_response_file};
use dhl_mapping::{DiagnosticSink, MemorySink, ShipmentOrderMapper, TracingSink, split_street};
use dhl_model::{ShipmentRequest, ShipperAddressOverride};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dhl")]
#[command(about = "DHL shipment mapper CLI")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a shipment request onto a DHL shipment order
    Map {
        /// Request JSON file path
        request: PathBuf,

        /// Correlation token for the order
        #[arg(short, long, default_value = "")]
        reference: String,

        /// Shipper override JSON file path
        #[arg(short = 'o', long = "override")]
        override_file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Print mapping diagnostics to stderr
        #[arg(long)]
        explain: bool,
    },

    /// Parse a label response XML file
    ParseResponse {
        /// Response XML file path
        response: PathBuf,
    },

    /// Split a street line into name and number
    SplitStreet {
        /// Street line, e.g. "Charles-de-Gaulle-Str. 20"
        line: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Xml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Map {
            request,
            reference,
            override_file,
            format,
            explain,
        } => {
            let config = CliConfig::load(cli.config.as_deref())?;
            run_map(&request, &reference, override_file.as_deref(), format, explain, config)
        }
        Commands::ParseResponse { response } => {
            tracing::info!("Parsing response {}", response.display());
            let parsed = parse_response_file(&response)
                .with_context(|| format!("parse response {}", response.display()))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
        Commands::SplitStreet { line } => {
            let parts = split_street(&line);
            let value = serde_json::json!({
                "streetName": parts.name,
                "streetNumber": parts.number,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_map(
    request_path: &Path,
    reference: &str,
    override_file: Option<&Path>,
    format: Format,
    explain: bool,
    config: CliConfig,
) -> Result<()> {
    tracing::info!("Mapping {}", request_path.display());
    let request = ShipmentRequest::from_file(request_path)
        .with_context(|| format!("load request {}", request_path.display()))?;

    let shipper_override = match override_file {
        Some(path) => Some(load_override(path)?),
        None => config.shipper_override,
    };

    let mapper = ShipmentOrderMapper::with_config(config.mapper);
    let memory = MemorySink::new();
    let sink: &dyn DiagnosticSink = if explain { &memory } else { &TracingSink };

    let order = mapper
        .map(&request, sink, reference, shipper_override.as_ref())
        .with_context(|| format!("map request {}", request_path.display()))?;

    let output = match format {
        Format::Json => serde_json::to_string_pretty(&order)?,
        Format::Xml => OrderSerializer::new().to_xml(&order)?,
    };
    println!("{output}");

    if explain {
        for diagnostic in memory.entries() {
            eprintln!("{diagnostic}");
        }
    }
    Ok(())
}

fn load_override(path: &Path) -> Result<ShipperAddressOverride> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read shipper override {}", path.display()))?;
    ShipperAddressOverride::from_json_str(&json)
        .with_context(|| format!("parse shipper override {}", path.display()))
}
