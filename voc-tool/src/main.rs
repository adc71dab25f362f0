use anyhow::{bail, Context, Result};
use clap::Parser;
use prettytable::{cell, row, Table};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};
use voc_annotation::{
    collect_annotation_files, process_files, AnnotationNormalizer, BndBoxSummary, CoordTag,
    NormalizeConfig,
};

#[derive(Debug, Clone, Parser)]
/// Pascal VOC annotation toolkit
enum Opts {
    /// Normalize annotation files in place
    Normalize {
        #[clap(long)]
        /// configuration file
        config_file: Option<PathBuf>,
        #[clap(long)]
        /// report changes without writing files
        dry_run: bool,
        /// annotation files or directories, defaults to the current directory
        inputs: Vec<PathBuf>,
    },
    /// Print the bounding boxes of annotation files
    Inspect {
        #[clap(long)]
        /// configuration file
        config_file: Option<PathBuf>,
        /// annotation files or directories, defaults to the current directory
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    match Opts::parse() {
        Opts::Normalize {
            config_file,
            dry_run,
            inputs,
        } => {
            normalize(config_file.as_deref(), dry_run, inputs)?;
        }
        Opts::Inspect {
            config_file,
            inputs,
        } => {
            inspect(config_file.as_deref(), inputs)?;
        }
    }

    Ok(())
}

fn load_normalizer(config_file: Option<&Path>) -> Result<AnnotationNormalizer> {
    let config = match config_file {
        Some(path) => NormalizeConfig::open(path)?,
        None => NormalizeConfig::default(),
    };
    AnnotationNormalizer::new(&config)
}

fn input_files(inputs: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let inputs = if inputs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        inputs
    };
    let files = collect_annotation_files(&inputs)?;
    if files.is_empty() {
        warn!("no annotation files found");
    }
    Ok(files)
}

fn normalize(config_file: Option<&Path>, dry_run: bool, inputs: Vec<PathBuf>) -> Result<()> {
    let normalizer = load_normalizer(config_file)?;
    let files = input_files(inputs)?;
    let report = process_files(&normalizer, &files, dry_run);

    info!(
        "processed {} files, {} modified, {} bounding boxes, {} failed{}",
        report.processed,
        report.modified,
        report.bndboxes,
        report.failures.len(),
        if dry_run { " (dry run)" } else { "" }
    );

    if !report.is_success() {
        bail!("{} of {} files failed", report.failures.len(), files.len());
    }

    Ok(())
}

fn inspect(config_file: Option<&Path>, inputs: Vec<PathBuf>) -> Result<()> {
    let normalizer = load_normalizer(config_file)?;
    let files = input_files(inputs)?;

    let mut table = Table::new();
    table.add_row(row![
        "file",
        "index",
        CoordTag::XMin,
        CoordTag::YMin,
        CoordTag::XMax,
        CoordTag::YMax,
        "canonical"
    ]);

    for path in &files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read '{}'", path.display()))?;

        for (index, summary) in normalizer.inspect(&text).iter().enumerate() {
            let [xmin, ymin, xmax, ymax] = value_cells(summary);
            table.add_row(row![
                path.display(),
                index,
                xmin,
                ymin,
                xmax,
                ymax,
                summary.canonical
            ]);
        }
    }

    table.printstd();

    Ok(())
}

/// Coordinate cells as written in the file, `-` for a missing tag.
fn value_cells(summary: &BndBoxSummary) -> [String; 4] {
    summary
        .values
        .map(|value| value.map(str::to_owned).unwrap_or_else(|| "-".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_shows_unclamped_values() -> Result<()> {
        let normalizer = AnnotationNormalizer::new(&NormalizeConfig::default())?;
        let text = "<bndbox>\n<ymin>7</ymin>\n<xmin>1024</xmin>\n<ymax>0640</ymax>\n</bndbox>";

        let summaries = normalizer.inspect(text);
        assert_eq!(summaries.len(), 1);
        assert_eq!(value_cells(&summaries[0]), ["1024", "7", "-", "0640"]);
        assert!(!summaries[0].canonical);
        Ok(())
    }
}
