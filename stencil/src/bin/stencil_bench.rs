//! Times every partition strategy against the sequential baseline.
//!
//! Usage: `stencil_bench <config.yaml>`

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use common::log_setup::setup_logging;
use common::{pgm, Grid};
use stencil::experiment::{measure, BenchConfig};
use stencil::{apply_filter_parallel, apply_filter_sequential, BuiltinFilter};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: stencil_bench <config.yaml>")?;
    let yaml = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read bench config {path}"))?;
    let config = BenchConfig::from_yaml(&yaml)
        .with_context(|| format!("Failed to parse bench config {path}"))?;

    setup_logging(&config.log_level, config.log_dir.as_deref());

    let source = match &config.input {
        Some(input) => pgm::read(input)
            .with_context(|| format!("Failed to read graymap {}", input.display()))?,
        None => config.random_grid(),
    };
    tracing::info!(
        width = source.width(),
        height = source.height(),
        runs = config.runs().len(),
        "benchmark grid ready"
    );

    for &builtin in &config.filters {
        bench_filter(&config, builtin, &source)?;
    }

    Ok(())
}

fn bench_filter(config: &BenchConfig, builtin: BuiltinFilter, source: &Grid<i32>) -> Result<()> {
    let filter = builtin.filter();
    let (width, height) = (source.width(), source.height());

    let mut baseline = Grid::new_default(width, height);
    let timing = measure(config.repetitions, || {
        apply_filter_sequential(&filter, source, &mut baseline, width, height).map(|_| ())
    })?;
    tracing::info!(filter = %builtin, "sequential: {timing}");

    if let Some(output) = &config.output {
        let path = output_path(output, builtin);
        pgm::write(&path, &baseline)
            .with_context(|| format!("Failed to write graymap {}", path.display()))?;
    }

    let mut destination = vec![0; width * height];
    for run in config.runs() {
        let timing = measure(config.repetitions, || {
            apply_filter_parallel(&filter, source, &mut destination, width, height, &run)
                .map(|_| ())
        })
        .with_context(|| format!("{builtin} {run} failed"))?;

        if destination.as_slice() != baseline.samples() {
            bail!("{builtin} {run} differs from the sequential baseline");
        }
        tracing::info!(filter = %builtin, "{run}: {timing}");
    }

    Ok(())
}

/// `out.pgm` + `laplacian3` -> `out_laplacian3.pgm`.
fn output_path(output: &Path, builtin: BuiltinFilter) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output.with_file_name(format!("{stem}_{builtin}.pgm"))
}
