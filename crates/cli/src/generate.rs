use std::path::{Path, PathBuf};

use clap::Args;
use discogen_core::{
    DiscoveryDocument, GeneratorConfig, GeneratorError, JavaNamer, OutputUnit, generate,
    generate_parallel,
};
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Discovery document (JSON)
    #[arg(long, value_name = "JSON")]
    pub discovery: PathBuf,
    /// Generator configuration (TOML)
    #[arg(long, value_name = "TOML")]
    pub config: PathBuf,
    /// Write the batch here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Process interfaces concurrently
    #[arg(long)]
    pub parallel: bool,
}

pub fn run(args: &GenerateArgs) -> i32 {
    match run_inner(args) {
        Ok(count) => {
            debug!(files = count, "Wrote output batch.");
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_inner(args: &GenerateArgs) -> Result<usize, String> {
    let units = load_and_generate(args).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&units)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;

    match &args.output {
        Some(path) => write_output(path, &json)?,
        None => println!("{json}"),
    }
    Ok(units.len())
}

fn load_and_generate(args: &GenerateArgs) -> Result<Vec<OutputUnit>, GeneratorError> {
    let doc = DiscoveryDocument::load(&args.discovery)?;
    let config = GeneratorConfig::load(&args.config)?;
    if args.parallel {
        generate_parallel(&doc, &config, &JavaNamer)
    } else {
        generate(&doc, &config, &JavaNamer)
    }
}

fn write_output(path: &Path, json: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
