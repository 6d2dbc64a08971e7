//! Facet
//!
//! Converts OpenSCAD models into colour-segmented binary glTF assets.
//!
//! Each model is compiled to flattened CSG, split into one partition per
//! `color(...)` region, meshed to STL partition by partition, and packed into
//! a single `.glb` with one mesh and material per colour.

mod app;
mod config;
mod inputs;
mod pipeline;
mod tool;

use clap::Parser;
use config::FacetConfig;
use std::path::PathBuf;
use tracing::error;

/// Facet - OpenSCAD to GLB converter
#[derive(Parser, Debug)]
#[command(name = "facet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder to save output into
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// OpenSCAD executable
    #[arg(long, env = "OPENSCAD", value_name = "PATH")]
    openscad: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. info, debug)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Mark materials as unlit (KHR_materials_unlit)
    #[arg(long)]
    unlit: bool,

    /// Path(s) or glob pattern(s) of the .scad file(s)
    #[arg(default_value = "3d_src/*")]
    files: Vec<String>,
}

impl Args {
    /// Load the config file, if any, and apply command-line overrides.
    fn resolve_config(&self) -> Result<FacetConfig, config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => FacetConfig::load(path)?,
            None => FacetConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(openscad) = &self.openscad {
            config.openscad = openscad.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config.unlit |= self.unlit;
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    // Logging is configured from the resolved config, so config errors go to stderr.
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };
    app::init_logging(&config);

    match app::run(&config, &args.files) {
        Ok(report) if report.all_succeeded() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    }
}
