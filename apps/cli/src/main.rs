//! FHIR resource command-line tools
//!
//! Decode FHIR JSON documents, run structural validation, and assemble
//! searchset bundles without standing up a server.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use salus_models::{AnyResource, Bundle};
use salus_validator::validate_any;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// FHIR resource tools
#[derive(Parser)]
#[command(name = "salus")]
#[command(author, version, about = "FHIR resource validation and bundling tools", long_about = None)]
struct Cli {
    /// Only print failures
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and validate FHIR JSON resources
    Validate {
        /// Resource files to validate
        files: Vec<PathBuf>,
    },
    /// Assemble validated resources into a searchset Bundle on stdout
    Bundle {
        /// Resource files to bundle
        files: Vec<PathBuf>,
        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { files } => validate_files(&files, cli.quiet),
        Commands::Bundle { files, pretty } => bundle_files(&files, pretty),
    }
}

fn load_resource(path: &Path) -> Result<AnyResource> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))?;
    AnyResource::from_value(&value).with_context(|| format!("failed to decode {}", path.display()))
}

fn validate_files(files: &[PathBuf], quiet: bool) -> Result<()> {
    if files.is_empty() {
        bail!("no input files");
    }

    let mut failures = 0usize;
    for path in files {
        match load_resource(path).and_then(|resource| {
            validate_any(&resource)
                .with_context(|| format!("{} failed validation", path.display()))
                .map(|()| resource)
        }) {
            Ok(resource) => {
                debug!(path = %path.display(), resource_type = resource.resource_type(), "valid");
                if !quiet {
                    println!("{}: ok ({})", path.display(), resource.resource_type());
                }
            }
            Err(err) => {
                failures += 1;
                warn!(path = %path.display(), "invalid resource");
                eprintln!("{}: {:#}", path.display(), err);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) failed", files.len());
    }
    Ok(())
}

fn bundle_files(files: &[PathBuf], pretty: bool) -> Result<()> {
    if files.is_empty() {
        bail!("no input files");
    }

    let mut resources = Vec::with_capacity(files.len());
    for path in files {
        let resource = load_resource(path)?;
        validate_any(&resource).with_context(|| format!("{} failed validation", path.display()))?;
        resources.push(resource);
    }

    let bundle = Bundle::searchset(resources);
    let value = bundle.to_value()?;
    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    Ok(())
}
