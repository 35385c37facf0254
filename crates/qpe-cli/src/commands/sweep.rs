//! Sweep command implementation.

use std::ops::RangeInclusive;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use qpe_core::{QftLayout, ScalingStudy};

use super::common::{OutputFormat, build_backend, format_point, render_plot};

/// Options of the sweep command.
pub struct SweepOptions {
    pub phase: f64,
    pub qubits: RangeInclusive<u32>,
    pub shots: u32,
    pub seed: Option<u64>,
    pub layout: QftLayout,
    pub exact: bool,
    pub format: OutputFormat,
    pub plot: bool,
}

/// Execute the sweep command.
pub async fn execute(opts: SweepOptions) -> Result<()> {
    if opts.qubits.is_empty() {
        anyhow::bail!(
            "--min-qubits ({}) must not exceed --max-qubits ({})",
            opts.qubits.start(),
            opts.qubits.end()
        );
    }

    let backend = build_backend(opts.seed, opts.exact);
    let study = ScalingStudy::new()
        .with_true_phase(opts.phase)
        .with_qubit_range(opts.qubits.clone())
        .with_shots(opts.shots)
        .with_layout(opts.layout);

    let table = opts.format == OutputFormat::Table;
    let progress = if table {
        println!(
            "{} Estimating phase {} with {}..={} counting qubits ({} shots, {} layout{})",
            style("→").cyan().bold(),
            style(opts.phase).green(),
            opts.qubits.start(),
            opts.qubits.end(),
            opts.shots,
            style(opts.layout).yellow(),
            if opts.exact { ", exact counts" } else { "" }
        );
        let bar = ProgressBar::new(opts.qubits.clone().count() as u64);
        bar.set_style(ProgressStyle::default_bar().template("{bar:30.cyan/blue} {pos}/{len} {msg}")?);
        bar
    } else {
        ProgressBar::hidden()
    };

    let series = study
        .run_with(&backend, |point| {
            if table {
                progress.suspend(|| println!("{}", format_point(point)));
            }
            progress.set_message(format!("{} qubits done", point.n_count));
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();
    info!(points = series.len(), "sweep finished");

    match opts.format {
        OutputFormat::Table => {
            if opts.plot {
                println!();
                println!("{}", render_plot(&series));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }

    Ok(())
}
