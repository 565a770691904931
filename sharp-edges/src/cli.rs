//! Argument parsing and the command runner.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mesh_sharpness::{check_sharp_edges, EdgeIndex, FoldFilter, SharpnessParams};
use mesh_types::{Aabb, Triangle};
use tracing::info;

use crate::input::load_triangles;

/// Check a triangle mesh for sharp edges.
///
/// Exits with a non-zero status when the mesh has sharp or degenerate edges,
/// or is not manifold.
#[derive(Debug, Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "sharp-edges")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON facet list to check
    #[arg(value_name = "MESH_FILE")]
    pub mesh_file: PathBuf,

    /// Edges with a dihedral angle below this many degrees are too sharp
    /// (clamped to 89)
    #[arg(short, long, default_value_t = 80.0)]
    pub threshold: f64,

    /// Print a mesh overview instead of checking edges
    #[arg(long)]
    pub view: bool,

    /// Report only concave (valley) edges
    #[arg(long, conflicts_with_all = ["convex_only", "legacy"])]
    pub concave_only: bool,

    /// Report only convex (ridge) edges
    #[arg(long, conflicts_with = "legacy")]
    pub convex_only: bool,

    /// Legacy selection: convex edges only
    #[arg(long)]
    pub legacy: bool,

    /// Write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything a run needs, resolved from [`Args`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Mesh to check.
    pub mesh_path: PathBuf,
    /// Print an overview instead of checking.
    pub view: bool,
    /// Where to write the JSON report.
    pub output: Option<PathBuf>,
    /// Analysis parameters.
    pub params: SharpnessParams,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let params = if args.legacy {
            SharpnessParams::legacy()
        } else if args.concave_only {
            SharpnessParams::default().fold_filter(FoldFilter::ConcaveOnly)
        } else if args.convex_only {
            SharpnessParams::default().fold_filter(FoldFilter::ConvexOnly)
        } else {
            SharpnessParams::default()
        };

        Self {
            mesh_path: args.mesh_file.clone(),
            view: args.view,
            output: args.output.clone(),
            params: params.threshold(args.threshold),
        }
    }
}

/// Run a check, writing human-readable output to `out`.
///
/// Returns whether the mesh passed.
pub fn run(config: &Config, out: &mut impl Write) -> Result<bool> {
    let triangles = load_triangles(&config.mesh_path)?;
    info!(
        path = %config.mesh_path.display(),
        triangles = triangles.len(),
        "Loaded mesh"
    );

    if config.view {
        return view(&triangles, config, out);
    }

    let report = check_sharp_edges(&triangles, &config.params)
        .with_context(|| format!("cannot check {}", config.mesh_path.display()))?;

    write!(out, "{report}")?;

    if let Some(path) = &config.output {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
        writer.flush()?;
        info!(path = %path.display(), "Wrote report");
    }

    Ok(report.passed)
}

fn view(triangles: &[Triangle], config: &Config, out: &mut impl Write) -> Result<bool> {
    let index = EdgeIndex::build(triangles);
    let degenerate = triangles.iter().filter(|t| t.is_degenerate()).count();

    writeln!(out, "Mesh: {}", config.mesh_path.display())?;
    writeln!(out, "  Triangles: {}", triangles.len())?;
    writeln!(out, "  Degenerate triangles: {degenerate}")?;
    writeln!(out, "  Bounds: {}", Aabb::from_triangles(triangles))?;
    writeln!(out, "  Edges: {}", index.edge_count())?;
    writeln!(out, "  Boundary edges: {}", index.boundary_edge_count())?;
    writeln!(out, "  Non-manifold edges: {}", index.non_manifold_edge_count())?;
    writeln!(out, "  Manifold: {}", if index.is_manifold() { "yes" } else { "no" })?;

    Ok(index.is_manifold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_sharpness::SharpnessReport;
    use mesh_types::{regular_tetrahedron, unit_cube};

    fn parse(args: &[&str]) -> Option<Args> {
        Args::try_parse_from(std::iter::once("sharp-edges").chain(args.iter().copied())).ok()
    }

    fn write_mesh(name: &str, triangles: &[Triangle]) -> PathBuf {
        let facets: Vec<_> = triangles
            .iter()
            .map(|t| {
                serde_json::json!({
                    "vertices": t.vertices.map(|v| [v.x, v.y, v.z]),
                    "normal": [t.normal.x, t.normal.y, t.normal.z],
                })
            })
            .collect();
        let file_name = format!("sharp-edges-{}-{name}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let written = std::fs::write(&path, serde_json::Value::Array(facets).to_string());
        assert!(written.is_ok());
        path
    }

    fn config(path: PathBuf) -> Config {
        Config {
            mesh_path: path,
            view: false,
            output: None,
            params: SharpnessParams::default(),
        }
    }

    #[test]
    fn defaults() {
        let Some(args) = parse(&["mesh.json"]) else {
            panic!("arguments should parse");
        };
        let config = Config::from(&args);
        assert_eq!(config.mesh_path, PathBuf::from("mesh.json"));
        assert!(!config.view);
        assert_eq!(config.params, SharpnessParams::default());
    }

    #[test]
    fn threshold_is_clamped() {
        let Some(args) = parse(&["-t", "120", "mesh.json"]) else {
            panic!("arguments should parse");
        };
        let config = Config::from(&args);
        assert!((config.params.threshold_degrees - 89.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fold_flags() {
        let concave =
            parse(&["--concave-only", "m.json"]).map(|a| Config::from(&a).params.fold_filter);
        assert_eq!(concave, Some(FoldFilter::ConcaveOnly));

        let legacy = parse(&["--legacy", "-t", "60", "m.json"]).map(|a| Config::from(&a).params);
        assert_eq!(legacy, Some(SharpnessParams::legacy().threshold(60.0)));

        assert!(parse(&["--concave-only", "--convex-only", "m.json"]).is_none());
        assert!(parse(&[]).is_none());
    }

    #[test]
    fn cube_passes() {
        let path = write_mesh("cube", &unit_cube());
        let mut out = Vec::new();
        let passed = run(&config(path.clone()), &mut out);
        let _ = std::fs::remove_file(path);

        assert!(passed.is_ok_and(|p| p));
        let text = String::from_utf8_lossy(&out);
        assert!(text
            .contains("Shape passed! Edges aren't too sharp. (All are greater than 80 degrees)"));
    }

    #[test]
    fn tetrahedron_fails_and_writes_report() {
        let path = write_mesh("tet", &regular_tetrahedron());
        let report_path = path.with_extension("report.json");
        let mut config = config(path.clone());
        config.output = Some(report_path.clone());

        let mut out = Vec::new();
        let passed = run(&config, &mut out);
        let report = std::fs::read_to_string(&report_path)
            .ok()
            .and_then(|json| serde_json::from_str::<SharpnessReport>(&json).ok());
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(report_path);

        assert!(passed.is_ok_and(|p| !p));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ERROR: 6 edges are too sharp! (Are less than 80 degrees)"));
        assert!(text.contains("70.53 degree angle found!"));

        let Some(report) = report else {
            panic!("report should be written");
        };
        assert_eq!(report.findings.len(), 6);
        assert_eq!(report.offending_triangles.len(), 4);
    }

    #[test]
    fn open_mesh_is_an_error() {
        let mut cube = unit_cube();
        cube.truncate(11);
        let path = write_mesh("open", &cube);
        let result = run(&config(path.clone()), &mut Vec::new());
        let _ = std::fs::remove_file(path);

        let message = result.err().map(|e| format!("{e:#}")).unwrap_or_default();
        assert!(message.contains("not manifold"));
    }

    #[test]
    fn view_reports_open_mesh() {
        let mut cube = unit_cube();
        cube.truncate(11);
        let path = write_mesh("view", &cube);
        let mut config = config(path.clone());
        config.view = true;

        let mut out = Vec::new();
        let manifold = run(&config, &mut out);
        let _ = std::fs::remove_file(path);

        assert!(manifold.is_ok_and(|m| !m));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Triangles: 11"));
        assert!(text.contains("Boundary edges: 3"));
        assert!(text.contains("Manifold: no"));
    }
}
