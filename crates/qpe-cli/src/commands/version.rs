//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Quantum phase estimation scaling study",
        style("QPE").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpe-ir           Circuit intermediate representation");
    println!("  qpe-hal          Simulation backend abstraction");
    println!("  qpe-adapter-sim  Local statevector simulator");
    println!("  qpe-core         QFT, phase estimation and scaling sweep");
    println!("  qpe-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
