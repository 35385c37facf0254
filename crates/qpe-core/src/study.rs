//! Scaling sweep: phase estimation error versus counting-register size.

use std::ops::RangeInclusive;

use qpe_hal::Backend;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::AlgoResult;
use crate::estimation::qpe_circuit_with_layout;
use crate::extract::{estimate_phase, phase_error};
use crate::transform::QftLayout;

/// Phase estimated by the default sweep.
pub const DEFAULT_TRUE_PHASE: f64 = 0.125;

/// Shots per circuit in the default sweep.
pub const DEFAULT_SHOTS: u32 = 4096;

/// Counting-register sizes of the default sweep.
pub const DEFAULT_QUBIT_RANGE: RangeInclusive<u32> = 2..=7;

/// One sweep iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Number of counting qubits.
    pub n_count: u32,
    /// Phase read from the most frequent outcome.
    pub estimate: f64,
    /// `|estimate - true_phase|`.
    pub error: f64,
}

/// Ordered results of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSeries {
    /// Phase encoded in the unitary.
    pub true_phase: f64,
    /// Shots per circuit.
    pub shots: u32,
    /// Transform layout used by every circuit.
    pub layout: QftLayout,
    /// One entry per qubit count, ascending.
    pub points: Vec<SweepPoint>,
}

impl ErrorSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the sweep produced no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter()
    }

    /// Point for a given qubit count.
    pub fn get(&self, n_count: u32) -> Option<&SweepPoint> {
        self.points.iter().find(|p| p.n_count == n_count)
    }
}

/// Sweep configuration.
///
/// ```rust,ignore
/// use qpe_adapter_sim::SimulatorBackend;
/// use qpe_core::ScalingStudy;
///
/// let backend = SimulatorBackend::new().with_seed(7);
/// let series = ScalingStudy::default().run(&backend).await?;
/// for point in series.iter() {
///     println!("{} -> {:.4}", point.n_count, point.estimate);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingStudy {
    /// Phase encoded in the unitary.
    pub true_phase: f64,
    /// Counting-register sizes, swept in ascending order.
    pub qubit_range: RangeInclusive<u32>,
    /// Shots per circuit.
    pub shots: u32,
    /// Transform layout.
    pub layout: QftLayout,
}

impl Default for ScalingStudy {
    fn default() -> Self {
        Self {
            true_phase: DEFAULT_TRUE_PHASE,
            qubit_range: DEFAULT_QUBIT_RANGE,
            shots: DEFAULT_SHOTS,
            layout: QftLayout::default(),
        }
    }
}

impl ScalingStudy {
    /// Study with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the phase to estimate.
    #[must_use]
    pub fn with_true_phase(mut self, phase: f64) -> Self {
        self.true_phase = phase;
        self
    }

    /// Set the counting-register sizes.
    #[must_use]
    pub fn with_qubit_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.qubit_range = range;
        self
    }

    /// Set the shots per circuit.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the transform layout.
    #[must_use]
    pub fn with_layout(mut self, layout: QftLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Run the sweep to completion.
    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> AlgoResult<ErrorSeries> {
        self.run_with(backend, |_| {}).await
    }

    /// Run the sweep, calling `on_point` as each point is produced.
    ///
    /// Circuits are executed one at a time. The first failure aborts the
    /// sweep.
    #[instrument(skip(self, backend, on_point), fields(backend = backend.name()))]
    pub async fn run_with<B, F>(&self, backend: &B, mut on_point: F) -> AlgoResult<ErrorSeries>
    where
        B: Backend + ?Sized,
        F: FnMut(&SweepPoint),
    {
        info!(
            true_phase = self.true_phase,
            min = *self.qubit_range.start(),
            max = *self.qubit_range.end(),
            shots = self.shots,
            layout = %self.layout,
            "starting scaling sweep"
        );

        let mut points = Vec::with_capacity(self.qubit_range.clone().count());
        for n_count in self.qubit_range.clone() {
            let circuit = qpe_circuit_with_layout(n_count, self.true_phase, self.layout)?;
            let result = backend.run(&circuit, self.shots).await?;
            let estimate = estimate_phase(&result.counts, n_count)?;
            let point = SweepPoint {
                n_count,
                estimate,
                error: phase_error(estimate, self.true_phase),
            };
            debug!(
                n_count,
                estimate,
                error = point.error,
                outcomes = result.counts.len(),
                "sweep point"
            );
            on_point(&point);
            points.push(point);
        }

        Ok(ErrorSeries {
            true_phase: self.true_phase,
            shots: self.shots,
            layout: self.layout,
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let study = ScalingStudy::default();
        assert_eq!(study.true_phase, 0.125);
        assert_eq!(study.qubit_range, 2..=7);
        assert_eq!(study.shots, 4096);
        assert_eq!(study.layout, QftLayout::EndSwap);
    }

    #[test]
    fn test_builder() {
        let study = ScalingStudy::new()
            .with_true_phase(0.3)
            .with_qubit_range(3..=5)
            .with_shots(100)
            .with_layout(QftLayout::Textbook);
        assert_eq!(study.true_phase, 0.3);
        assert_eq!(study.qubit_range, 3..=5);
        assert_eq!(study.shots, 100);
        assert_eq!(study.layout, QftLayout::Textbook);
    }

    #[test]
    fn test_series_lookup() {
        let series = ErrorSeries {
            true_phase: 0.125,
            shots: 10,
            layout: QftLayout::EndSwap,
            points: vec![
                SweepPoint { n_count: 2, estimate: 0.0, error: 0.125 },
                SweepPoint { n_count: 3, estimate: 0.125, error: 0.0 },
            ],
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(3).map(|p| p.error), Some(0.0));
        assert!(series.get(4).is_none());
    }
}
