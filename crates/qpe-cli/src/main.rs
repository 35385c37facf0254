//! QPE Command-Line Interface
//!
//! Runs the quantum phase estimation scaling study and its building blocks
//! on the local statevector simulator.
//!
//! ```text
//! qpe sweep                         # phase 0.125, 2..=7 counting qubits, 4096 shots
//! qpe sweep --layout textbook --exact
//! qpe estimate --qubits 5 --phase 0.3
//! qpe circuit --qubits 3 --json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{LayoutArg, OutputFormat};
use commands::{circuit, estimate, sweep, version};
use qpe_core::{DEFAULT_QUBIT_RANGE, DEFAULT_SHOTS, DEFAULT_TRUE_PHASE};

/// QPE - phase estimation error versus counting-register size
#[derive(Parser)]
#[command(name = "qpe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the number of counting qubits and report the estimation error
    Sweep {
        /// Phase encoded in the unitary, in turns
        #[arg(short, long, default_value_t = DEFAULT_TRUE_PHASE)]
        phase: f64,

        /// Smallest counting register
        #[arg(long, default_value_t = *DEFAULT_QUBIT_RANGE.start())]
        min_qubits: u32,

        /// Largest counting register
        #[arg(long, default_value_t = *DEFAULT_QUBIT_RANGE.end())]
        max_qubits: u32,

        /// Shots per circuit
        #[arg(short, long, default_value_t = DEFAULT_SHOTS)]
        shots: u32,

        /// Seed for shot sampling
        #[arg(long, env = "QPE_SEED")]
        seed: Option<u64>,

        /// Fourier transform layout
        #[arg(long, value_enum, default_value_t = LayoutArg::EndSwap)]
        layout: LayoutArg,

        /// Use noise-free expected counts instead of sampled shots
        #[arg(long)]
        exact: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Skip the error plot
        #[arg(long)]
        no_plot: bool,
    },

    /// Run a single phase estimation and show the outcome histogram
    Estimate {
        /// Number of counting qubits
        #[arg(short, long)]
        qubits: u32,

        /// Phase encoded in the unitary, in turns
        #[arg(short, long, default_value_t = DEFAULT_TRUE_PHASE)]
        phase: f64,

        /// Number of shots
        #[arg(short, long, default_value_t = DEFAULT_SHOTS)]
        shots: u32,

        /// Seed for shot sampling
        #[arg(long, env = "QPE_SEED")]
        seed: Option<u64>,

        /// Fourier transform layout
        #[arg(long, value_enum, default_value_t = LayoutArg::EndSwap)]
        layout: LayoutArg,

        /// Use noise-free expected counts instead of sampled shots
        #[arg(long)]
        exact: bool,
    },

    /// Print the operations of an estimation circuit
    Circuit {
        /// Number of counting qubits
        #[arg(short, long)]
        qubits: u32,

        /// Phase encoded in the unitary, in turns
        #[arg(short, long, default_value_t = DEFAULT_TRUE_PHASE)]
        phase: f64,

        /// Fourier transform layout
        #[arg(long, value_enum, default_value_t = LayoutArg::EndSwap)]
        layout: LayoutArg,

        /// Print only the inverse Fourier transform
        #[arg(long)]
        inverse_qft: bool,

        /// Emit the circuit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Sweep {
            phase,
            min_qubits,
            max_qubits,
            shots,
            seed,
            layout,
            exact,
            format,
            no_plot,
        } => {
            sweep::execute(sweep::SweepOptions {
                phase,
                qubits: min_qubits..=max_qubits,
                shots,
                seed,
                layout: layout.into(),
                exact,
                format,
                plot: !no_plot,
            })
            .await
        }

        Commands::Estimate {
            qubits,
            phase,
            shots,
            seed,
            layout,
            exact,
        } => estimate::execute(qubits, phase, shots, seed, layout.into(), exact).await,

        Commands::Circuit {
            qubits,
            phase,
            layout,
            inverse_qft,
            json,
        } => circuit::execute(qubits, phase, layout.into(), inverse_qft, json),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sweep_defaults() {
        let cli = Cli::try_parse_from(["qpe", "sweep"]).unwrap();
        match cli.command {
            Commands::Sweep {
                phase,
                min_qubits,
                max_qubits,
                shots,
                layout,
                exact,
                format,
                no_plot,
                ..
            } => {
                assert_eq!(phase, 0.125);
                assert_eq!((min_qubits, max_qubits), (2, 7));
                assert_eq!(shots, 4096);
                assert_eq!(layout, LayoutArg::EndSwap);
                assert!(!exact);
                assert_eq!(format, OutputFormat::Table);
                assert!(!no_plot);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn test_layout_and_verbosity_flags() {
        let cli = Cli::try_parse_from([
            "qpe", "-vv", "sweep", "--layout", "textbook", "--format", "json", "--exact",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Sweep {
                layout,
                format,
                exact,
                ..
            } => {
                assert_eq!(layout, LayoutArg::Textbook);
                assert_eq!(format, OutputFormat::Json);
                assert!(exact);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn test_estimate_requires_qubits() {
        assert!(Cli::try_parse_from(["qpe", "estimate"]).is_err());
        assert!(Cli::try_parse_from(["qpe", "estimate", "--qubits", "4"]).is_ok());
    }
}
