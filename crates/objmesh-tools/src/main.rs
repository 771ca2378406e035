//! `objmesh`: load OBJ files and print what a renderer would receive.

mod cli;
mod report;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use objmesh_core::{LoadOptions, LoadProgress, NoProgress, ObjMesh};
use objmesh_io::{create_handle, load_async_with, load_with};
use tracing::{error, info};

use crate::cli::{Cli, OutputFormat};
use crate::report::MeshReport;

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let options = cli.load_options();
    let mut failures = 0usize;
    for path in &cli.files {
        let loaded = if cli.background {
            load_in_background(path, &options, cli.format == OutputFormat::Text)
        } else {
            load_in_place(path, &options)
        };

        match loaded.and_then(|mesh| print_report(path, &mesh, &cli)) {
            Ok(()) => {}
            Err(err) => {
                error!(path = %path.display(), "{err:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        info!(failures, total = cli.files.len(), "some files failed to load");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_in_place(path: &Path, options: &LoadOptions) -> Result<ObjMesh> {
    let mut handle = create_handle();
    if !load_with(&mut handle, path, options, &mut NoProgress)? {
        bail!("{} does not exist", path.display());
    }
    handle
        .into_mesh()
        .context("load finished without producing a mesh")
}

fn load_in_background(path: &Path, options: &LoadOptions, show_progress: bool) -> Result<ObjMesh> {
    let task = load_async_with(create_handle(), path, options.clone())
        .map_err(|_| anyhow!("{} does not exist", path.display()))?;

    let bars = MultiProgress::new();
    if !show_progress {
        bars.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    let style = ProgressStyle::with_template(
        "{spinner:.green} {prefix:>8} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )?
    .progress_chars("#>-");
    let scan_bar = bars.add(ProgressBar::new(0).with_style(style.clone()).with_prefix("scan"));
    let resolve_bar = bars.add(ProgressBar::new(0).with_style(style).with_prefix("resolve"));
    scan_bar.set_message("bytes");
    resolve_bar.set_message("corners");

    for event in task.progress() {
        match event {
            LoadProgress::Scan {
                total_bytes,
                consumed_bytes,
            } => {
                scan_bar.set_length(total_bytes as u64);
                scan_bar.set_position(consumed_bytes as u64);
            }
            LoadProgress::Resolve {
                total_corners,
                processed_corners,
            } => {
                if !scan_bar.is_finished() {
                    scan_bar.finish();
                }
                resolve_bar.set_length(total_corners as u64);
                resolve_bar.set_position(processed_corners as u64);
            }
        }
    }
    scan_bar.finish_and_clear();
    resolve_bar.finish_and_clear();

    let handle = task.wait()?;
    handle
        .into_mesh()
        .context("load finished without producing a mesh")
}

fn print_report(path: &Path, mesh: &ObjMesh, cli: &Cli) -> Result<()> {
    let report = MeshReport::new(path, mesh, cli.dump);
    match cli.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn obj_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_both_load_paths_agree() {
        let file = obj_file("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nusemtl A\nf 1 2 3 4\n");
        let options = LoadOptions::default();
        let in_place = load_in_place(file.path(), &options).unwrap();
        let background = load_in_background(file.path(), &options, false).unwrap();
        assert_eq!(in_place, background);
        assert_eq!(in_place.num_triangles(), 2);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.obj");
        let options = LoadOptions::default();
        assert!(load_in_place(&missing, &options).is_err());
        assert!(load_in_background(&missing, &options, false).is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let file = obj_file("v 1 2 x\n");
        let err = load_in_place(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
    }
}
