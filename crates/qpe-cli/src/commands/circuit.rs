//! Circuit command implementation.

use anyhow::Result;
use console::style;

use qpe_core::{QftLayout, inverse_qft_with_layout, qpe_circuit_with_layout};

/// Execute the circuit command.
pub fn execute(
    qubits: u32,
    phase: f64,
    layout: QftLayout,
    inverse_qft: bool,
    json: bool,
) -> Result<()> {
    let circuit = if inverse_qft {
        inverse_qft_with_layout(qubits, layout)?
    } else {
        qpe_circuit_with_layout(qubits, phase, layout)?
    };

    if json {
        println!("{}", circuit.to_json()?);
        return Ok(());
    }

    println!(
        "{} {} ({} layout): {} qubits, {} clbits, {} ops, depth {}",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        style(layout).yellow(),
        circuit.num_qubits(),
        circuit.num_clbits(),
        circuit.len(),
        circuit.depth()
    );

    let width = circuit.len().to_string().len();
    for (i, inst) in circuit.instructions().iter().enumerate() {
        println!("  {:>width$}  {inst}", style(i).dim());
    }

    let mut ops: Vec<_> = circuit.count_ops().into_iter().collect();
    ops.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let summary: Vec<_> = ops.iter().map(|(name, n)| format!("{name}: {n}")).collect();
    println!("\n  Ops: {}", summary.join(", "));

    Ok(())
}
