//! Sharp edge checker for triangle meshes.
//!
//! Reads a JSON facet list, rejects meshes that are not manifold and reports
//! every edge whose dihedral angle is below the threshold.
//!
//! # Usage
//!
//! - `sharp-edges mesh.json` - Check with the default 80 degree threshold
//! - `sharp-edges -t 60 --convex-only mesh.json` - Only report sharp ridges
//! - `sharp-edges --view mesh.json` - Print a mesh overview
//! - `sharp-edges -o report.json mesh.json` - Also write the JSON report

mod cli;
mod input;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Args, Config};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::setup_logging(args.verbose);

    let config = Config::from(&args);
    let passed = cli::run(&config, &mut std::io::stdout().lock())?;

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
