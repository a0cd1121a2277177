//! CLI for count-based Venn diagrams.
//!
//! Provides:
//! - Layout of a single JSON chart description, written as layout JSON and/or SVG
//! - Parallel batch layout of many descriptions

mod description;
mod render;

use std::{fs, path::{Path, PathBuf}};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use rayon::prelude::*;

use description::Output;

#[derive(Parser)]
#[command(name = "venn")]
#[command(about = "Count-based Venn diagram layout", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VENN_BUILD_SHA"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, or trace (default: $RUST_LOG, else info)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out one chart description (.json or .json.gz)
    Layout {
        path: PathBuf,

        /// Write layout JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render an SVG
        #[arg(short, long)]
        svg: Option<PathBuf>,

        /// Override the description's width, in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Override the description's height, in pixels
        #[arg(long)]
        height: Option<f64>,
    },

    /// Lay out several chart descriptions in parallel, writing `<name>.json` and `<name>.svg` per input
    Batch {
        paths: Vec<PathBuf>,

        /// Output directory
        #[arg(short = 'd', long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(venn_core::parse_log_level(Some(level))?);
    }
    builder.init();
    Ok(())
}

fn run(path: &Path, width: Option<f64>, height: Option<f64>) -> Result<Output> {
    let mut description = description::load(path)?;
    if let Some(width) = width {
        description.width = width;
    }
    if let Some(height) = height {
        description.height = height;
    }
    description.render().with_context(|| format!("laying out {}", path.display()))
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Layout { path, output, svg, width, height } => {
            let Output { layout, svg: rendered } = run(&path, width, height)?;
            let json = serde_json::to_string_pretty(&layout)?;
            match output {
                Some(output) => write(&output, &json)?,
                None => println!("{}", json),
            }
            if let Some(svg) = svg {
                write(&svg, &rendered)?;
            }
        }
        Commands::Batch { paths, out_dir } => {
            fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
            let results: Vec<(&PathBuf, Result<Output>)> = paths
                .par_iter()
                .map(|path| (path, run(path, None, None)))
                .collect();
            let mut failures = 0;
            for (path, result) in results {
                let written = result.and_then(|Output { layout, svg }| {
                    let name = description::stem(path);
                    write(&out_dir.join(format!("{}.json", name)), &serde_json::to_string_pretty(&layout)?)?;
                    write(&out_dir.join(format!("{}.svg", name)), &svg)
                });
                if let Err(e) = written {
                    error!("{}: {:#}", path.display(), e);
                    failures += 1;
                }
            }
            if failures > 0 {
                bail!("{} of {} descriptions failed", failures, paths.len());
            }
        }
    }
    Ok(())
}
