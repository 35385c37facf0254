//! Shared helpers for CLI commands.

use clap::ValueEnum;
use console::style;

use qpe_adapter_sim::{SamplingMode, SimulatorBackend};
use qpe_core::{ErrorSeries, QftLayout, SweepPoint};
use qpe_hal::ExecutionResult;

/// Title of the error plot.
pub const PLOT_TITLE: &str = "QPE Phase Error vs Counting Qubits";

/// Width of the plot area in characters.
const PLOT_WIDTH: usize = 48;

/// Outcomes shown in a histogram before truncating.
const MAX_HISTOGRAM_ROWS: usize = 16;

/// Fourier transform layout, as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Ladder from qubit 0, single outer swap
    EndSwap,
    /// Ladder from the top qubit, full bit reversal
    Textbook,
}

impl From<LayoutArg> for QftLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::EndSwap => QftLayout::EndSwap,
            LayoutArg::Textbook => QftLayout::Textbook,
        }
    }
}

/// How sweep results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Progress lines and a text plot
    Table,
    /// The error series as JSON
    Json,
}

/// Build the local simulator.
pub fn build_backend(seed: Option<u64>, exact: bool) -> SimulatorBackend {
    let mode = if exact {
        SamplingMode::Expected
    } else {
        SamplingMode::Shots
    };
    let backend = SimulatorBackend::new().with_sampling(mode);
    match seed {
        Some(seed) => backend.with_seed(seed),
        None => backend,
    }
}

/// Format a value in scientific notation with two decimals and an
/// exponent of at least two digits, e.g. `1.25e-01`.
pub fn format_sci(value: f64) -> String {
    let raw = format!("{value:.2e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

/// One line of sweep progress.
pub fn format_point(point: &SweepPoint) -> String {
    format!(
        "Qubits: {} | Estimated phase: {:.4} | Error: {}",
        point.n_count,
        point.estimate,
        format_sci(point.error)
    )
}

/// Render the error series as a horizontal bar chart on a log10 error axis.
///
/// Each row is one qubit count. Zero errors cannot be placed on a log axis;
/// they are drawn at the floor and labelled as exact.
pub fn render_plot(series: &ErrorSeries) -> String {
    let mut lines = vec![PLOT_TITLE.to_string(), String::new()];
    if series.is_empty() {
        lines.push("  (no data)".to_string());
        return lines.join("\n");
    }

    let (lo, hi) = decade_bounds(series);
    let span = f64::from(hi - lo);
    let label_width = "Counting Qubits".len();

    lines.push(format!("{:>label_width$} │", "Counting Qubits"));
    for point in series.iter() {
        let (bar, label) = if point.error > 0.0 {
            let frac = (point.error.log10() - f64::from(lo)) / span;
            let len = ((frac * PLOT_WIDTH as f64).round() as usize).clamp(1, PLOT_WIDTH);
            ("█".repeat(len), format_sci(point.error))
        } else {
            ("▏".to_string(), "0 (exact)".to_string())
        };
        lines.push(format!(
            "{:>label_width$} │{bar} {label}",
            point.n_count
        ));
    }

    lines.push(format!("{:>label_width$} └{}", "", "─".repeat(PLOT_WIDTH)));
    let left = format_sci(10f64.powi(lo));
    let right = format_sci(10f64.powi(hi));
    let gap = PLOT_WIDTH.saturating_sub(right.len()) + 1;
    lines.push(format!("{:>label_width$}  {left:<gap$}{right}", ""));
    let axis = "Phase Error (log scale)";
    let pad = label_width + 2 + PLOT_WIDTH.saturating_sub(axis.len()) / 2;
    lines.push(format!("{:pad$}{axis}", ""));

    lines.join("\n")
}

/// Decade exponents bracketing the non-zero errors, one decade below the
/// smallest so that it still gets a visible bar.
fn decade_bounds(series: &ErrorSeries) -> (i32, i32) {
    let nonzero = series.iter().map(|p| p.error).filter(|e| *e > 0.0);
    let (min, max) = nonzero.fold((f64::INFINITY, 0.0f64), |(min, max), e| {
        (min.min(e), max.max(e))
    });
    if max == 0.0 {
        return (-3, 0);
    }
    let lo = min.log10().floor() as i32 - 1;
    let hi = (max.log10().ceil() as i32).max(lo + 1);
    (lo, hi)
}

/// Print execution results as a histogram.
pub fn print_results(result: &ExecutionResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_HISTOGRAM_ROWS) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_HISTOGRAM_ROWS {
        println!(
            "  ... and {} more outcomes",
            sorted.len() - MAX_HISTOGRAM_ROWS
        );
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}
