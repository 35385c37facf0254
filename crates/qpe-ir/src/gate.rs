//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Gates used by Fourier-transform and phase-estimation circuits.
///
/// Angles are concrete radians; there are no symbolic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Controlled phase gate: diag(1, 1, 1, e^{iθ}).
    CP(f64),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::H => 1,
            StandardGate::CP(_) | StandardGate::Swap => 2,
        }
    }

    /// Whether the first operand is a control qubit.
    ///
    /// Control and target must be distinct; `Swap` is not controlled and
    /// accepts a repeated operand as a no-op.
    pub fn is_controlled(&self) -> bool {
        matches!(self, StandardGate::CP(_))
    }

    /// Rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::CP(theta) => Some(*theta),
            _ => None,
        }
    }

    /// The adjoint of this gate.
    #[must_use]
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            gate => gate,
        }
    }
}

impl std::fmt::Display for StandardGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.angle() {
            Some(theta) => write!(f, "{}({theta:.6})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CP(PI).num_qubits(), 2);
        assert_eq!(StandardGate::Swap.num_qubits(), 2);

        assert!(StandardGate::CP(PI).is_controlled());
        assert!(!StandardGate::Swap.is_controlled());
        assert_eq!(StandardGate::CP(PI / 4.0).angle(), Some(PI / 4.0));
        assert_eq!(StandardGate::H.angle(), None);
    }

    #[test]
    fn test_gate_inverse() {
        assert_eq!(StandardGate::H.inverse(), StandardGate::H);
        assert_eq!(StandardGate::Swap.inverse(), StandardGate::Swap);
        assert_eq!(StandardGate::X.inverse(), StandardGate::X);
        assert_eq!(
            StandardGate::CP(PI / 8.0).inverse(),
            StandardGate::CP(-PI / 8.0)
        );
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(StandardGate::H.to_string(), "h");
        assert_eq!(StandardGate::CP(0.5).to_string(), "cp(0.500000)");
    }
}
