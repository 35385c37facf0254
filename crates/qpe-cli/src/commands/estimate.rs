//! Estimate command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use qpe_core::{QftLayout, estimate_phase, phase_error, qpe_circuit_with_layout};
use qpe_hal::Backend;

use super::common::{build_backend, format_sci, print_results};

/// Execute the estimate command.
pub async fn execute(
    qubits: u32,
    phase: f64,
    shots: u32,
    seed: Option<u64>,
    layout: QftLayout,
    exact: bool,
) -> Result<()> {
    println!(
        "{} Estimating phase {} with {} counting qubits ({} shots)",
        style("→").cyan().bold(),
        style(phase).green(),
        style(qubits).yellow(),
        shots
    );

    let circuit = qpe_circuit_with_layout(qubits, phase, layout)?;
    println!(
        "  Built: {} qubits, {} ops, depth {}",
        circuit.num_qubits(),
        circuit.len(),
        circuit.depth()
    );

    let backend = build_backend(seed, exact);
    let validation = backend.validate(&circuit, shots).await?;
    validation.into_result()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Simulating on {}...", backend.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = backend.run(&circuit, shots).await?;
    debug!(outcomes = result.counts.len(), "simulation returned");
    spinner.finish_and_clear();

    print_results(&result);

    let estimate = estimate_phase(&result.counts, qubits)?;
    let true_phase = phase.rem_euclid(1.0);
    println!(
        "\n  Estimated phase: {} (true {}, error {})",
        style(format!("{estimate:.4}")).green().bold(),
        true_phase,
        style(format_sci(phase_error(estimate, true_phase))).yellow()
    );

    Ok(())
}
