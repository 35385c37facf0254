//! Classical post-processing: frequency table to phase estimate.

use qpe_hal::Counts;
use tracing::debug;

use crate::error::{AlgoError, AlgoResult};

/// Widest counting register whose outcome fits a `u64`.
pub const MAX_COUNT_QUBITS: u32 = 64;

/// Estimate the phase from measured counts of an `n_count`-qubit register.
///
/// Takes the most frequent bitstring, reads it as an unsigned binary integer
/// `k` and returns `k / 2^n_count`. When several bitstrings share the highest
/// count, the lowest binary value wins.
///
/// Every key must consist of exactly `n_count` characters, each `0` or `1`.
pub fn estimate_phase(counts: &Counts, n_count: u32) -> AlgoResult<f64> {
    if n_count == 0 || n_count > MAX_COUNT_QUBITS {
        return Err(AlgoError::InvalidQubitCount(n_count));
    }
    if counts.is_empty() {
        return Err(AlgoError::EmptyCounts);
    }

    for (bitstring, _) in counts.iter() {
        parse_bitstring(bitstring, n_count)?;
    }
    let (bitstring, count) = counts.most_frequent().ok_or(AlgoError::EmptyCounts)?;
    let value = parse_bitstring(bitstring, n_count)?;

    let estimate = value as f64 / f64::from(n_count).exp2();
    debug!(n_count, value, count, estimate, "extracted phase");
    Ok(estimate)
}

/// Absolute distance between an estimate and the true phase.
pub fn phase_error(estimate: f64, true_phase: f64) -> f64 {
    (estimate - true_phase).abs()
}

fn parse_bitstring(bitstring: &str, n_count: u32) -> AlgoResult<u64> {
    let invalid = || AlgoError::InvalidBitstring {
        bitstring: bitstring.to_string(),
        expected: n_count,
    };
    if bitstring.len() != n_count as usize || !bitstring.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }
    u64::from_str_radix(bitstring, 2).map_err(|_| invalid())
}
