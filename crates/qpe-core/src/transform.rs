//! Quantum Fourier Transform builder.
//!
//! Two qubit orderings are available. [`QftLayout::EndSwap`] applies the
//! Hadamard/controlled-phase ladder from qubit 0 upwards and closes with a
//! single swap of the outermost qubits. [`QftLayout::Textbook`] runs the
//! ladder from the most significant qubit down and finishes with a full bit
//! reversal, which makes it the exact DFT on the little-endian register.
//!
//! ```rust
//! use qpe_core::transform::{qft, qft_with_layout, QftLayout};
//!
//! let circuit = qft(4).unwrap();
//! // 4 Hadamards, 6 controlled phases, 1 swap
//! assert_eq!(circuit.len(), 11);
//!
//! let textbook = qft_with_layout(4, QftLayout::Textbook).unwrap();
//! assert_eq!(textbook.count_ops()["swap"], 2);
//! ```

use std::f64::consts::PI;
use std::fmt;

use qpe_ir::{Circuit, QubitId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AlgoError, AlgoResult};

/// Qubit ordering of the Fourier transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QftLayout {
    /// Ladder from qubit 0 upwards, then `swap(0, n-1)`.
    #[default]
    EndSwap,
    /// Ladder from qubit `n-1` downwards, then `swap(k, n-1-k)` for `k < n/2`.
    Textbook,
}

impl QftLayout {
    /// Kebab-case identifier, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            QftLayout::EndSwap => "end-swap",
            QftLayout::Textbook => "textbook",
        }
    }
}

impl fmt::Display for QftLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the `n`-qubit Fourier transform with the default layout.
pub fn qft(n: u32) -> AlgoResult<Circuit> {
    qft_with_layout(n, QftLayout::default())
}

/// Build the `n`-qubit Fourier transform with the given layout.
///
/// The result has `n` qubits and no classical bits.
pub fn qft_with_layout(n: u32, layout: QftLayout) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }

    let mut circuit = Circuit::with_size(format!("qft{n}"), n, 0);
    match layout {
        QftLayout::EndSwap => {
            for i in 0..n {
                circuit.h(QubitId(i))?;
                for j in i + 1..n {
                    circuit.cp(ladder_angle(j - i), QubitId(j), QubitId(i))?;
                }
            }
            // n = 1 gives a self-swap, which is a no-op.
            circuit.swap(QubitId(0), QubitId(n - 1))?;
        }
        QftLayout::Textbook => {
            for j in (0..n).rev() {
                circuit.h(QubitId(j))?;
                for k in (0..j).rev() {
                    circuit.cp(ladder_angle(j - k), QubitId(k), QubitId(j))?;
                }
            }
            for k in 0..n / 2 {
                circuit.swap(QubitId(k), QubitId(n - 1 - k))?;
            }
        }
    }

    debug!(n, %layout, ops = circuit.len(), "built QFT");
    Ok(circuit)
}

/// Build the inverse of the `n`-qubit Fourier transform (default layout).
pub fn inverse_qft(n: u32) -> AlgoResult<Circuit> {
    inverse_qft_with_layout(n, QftLayout::default())
}

/// Build the inverse of the `n`-qubit Fourier transform.
pub fn inverse_qft_with_layout(n: u32, layout: QftLayout) -> AlgoResult<Circuit> {
    Ok(qft_with_layout(n, layout)?.inverse()?)
}

/// `π / 2^distance`.
fn ladder_angle(distance: u32) -> f64 {
    PI / f64::from(distance).exp2()
}
