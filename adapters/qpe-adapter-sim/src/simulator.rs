//! Simulator backend implementation.

use async_trait::async_trait;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, instrument};

use qpe_hal::{Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult};
use qpe_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Default qubit limit of the simulator.
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Widest classical register whose value fits a `u64`.
const MAX_CLBITS: usize = 64;

/// Probabilities below this are treated as exact zeros.
const PROBABILITY_EPSILON: f64 = 1e-12;

/// How measurement outcomes are turned into counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Draw every shot independently from the outcome distribution.
    #[default]
    Shots,
    /// Apportion shots to outcomes in proportion to their exact probability
    /// (largest-remainder rounding), so the table carries no sampling noise.
    Expected,
}

/// Local simulator backend.
///
/// Evolves the statevector once per run, then turns the distribution of the
/// classical register into counts according to its [`SamplingMode`].
/// Measurements must be terminal: a gate touching an already-measured qubit is
/// rejected.
pub struct SimulatorBackend {
    /// Cached capabilities.
    capabilities: Capabilities,
    /// How counts are produced.
    mode: SamplingMode,
    /// Sampling RNG.
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            mode: SamplingMode::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seed the sampling RNG for reproducible counts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Select how counts are produced.
    #[must_use]
    pub fn with_sampling(mut self, mode: SamplingMode) -> Self {
        self.mode = mode;
        self
    }

    /// The active sampling mode.
    pub fn sampling(&self) -> SamplingMode {
        self.mode
    }

    /// Exact distribution of the classical register, as `(bitstring, p)`
    /// pairs in ascending register value. Zero-probability outcomes are
    /// omitted.
    pub fn probabilities(&self, circuit: &Circuit) -> HalResult<Vec<(String, f64)>> {
        self.check_size(circuit)?;
        let distribution = register_distribution(circuit)?;
        let width = circuit.num_clbits();
        Ok(distribution
            .into_iter()
            .map(|(value, p)| (to_bitstring(value, width), p))
            .collect())
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if circuit.num_clbits() > MAX_CLBITS {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} classical bits; at most {MAX_CLBITS} are supported",
                circuit.num_clbits()
            )));
        }
        Ok(())
    }

    /// Draw `shots` independent samples.
    fn sample_shots(&self, distribution: &[(u64, f64)], shots: u32) -> HalResult<Vec<u64>> {
        let dist = WeightedIndex::new(distribution.iter().map(|(_, p)| *p))
            .map_err(|e| HalError::Backend(format!("Invalid outcome distribution: {e}")))?;

        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut tally = vec![0u64; distribution.len()];
        for _ in 0..shots {
            tally[dist.sample(&mut *rng)] += 1;
        }
        Ok(tally)
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} instructions, {} shots",
            circuit.num_qubits(),
            circuit.len(),
            shots
        );

        let distribution = register_distribution(circuit)?;
        let tally = match self.mode {
            SamplingMode::Shots => self.sample_shots(&distribution, shots)?,
            SamplingMode::Expected => apportion(&distribution, shots),
        };

        let width = circuit.num_clbits();
        let counts: Counts = distribution
            .iter()
            .zip(tally)
            .filter(|(_, count)| *count > 0)
            .map(|((value, _), count)| (to_bitstring(*value, width), count))
            .collect();

        let elapsed = start.elapsed();
        debug!(
            outcomes = counts.len(),
            "Simulation completed in {:?}", elapsed
        );

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "shots must be in 1..={}, got {shots}",
                self.capabilities.max_shots
            )));
        }
        self.check_size(circuit)?;
        self.run_simulation(circuit, shots)
    }
}

/// Evolve the circuit and marginalise onto the classical register.
///
/// Returns `(register value, probability)` pairs in ascending value, where
/// bit `k` of the value is the outcome written to classical bit `k`.
/// Unwritten classical bits read 0.
fn register_distribution(circuit: &Circuit) -> HalResult<Vec<(u64, f64)>> {
    let mut sv = Statevector::new(circuit.num_qubits());
    // clbit → measured qubit; a later measurement into the same clbit wins.
    let mut readout: FxHashMap<usize, usize> = FxHashMap::default();
    let mut measured = vec![false; circuit.num_qubits()];

    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                    return Err(HalError::Unsupported(format!(
                        "mid-circuit measurement: '{}' acts on {q} after it was measured",
                        gate.name()
                    )));
                }
                sv.apply(inst);
            }
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    measured[q.index()] = true;
                    readout.insert(c.index(), q.index());
                }
            }
        }
    }

    let mut marginal: FxHashMap<u64, f64> = FxHashMap::default();
    for (basis, p) in sv.probabilities().into_iter().enumerate() {
        if p < PROBABILITY_EPSILON {
            continue;
        }
        let value = readout
            .iter()
            .filter(|&(_, &qubit)| (basis >> qubit) & 1 == 1)
            .fold(0u64, |acc, (&clbit, _)| acc | (1 << clbit));
        *marginal.entry(value).or_insert(0.0) += p;
    }

    let mut distribution: Vec<_> = marginal.into_iter().collect();
    distribution.sort_by_key(|(value, _)| *value);
    Ok(distribution)
}

/// Largest-remainder apportionment of `shots` over `distribution`.
///
/// Ties in the remainder go to the lower register value.
fn apportion(distribution: &[(u64, f64)], shots: u32) -> Vec<u64> {
    let total: f64 = distribution.iter().map(|(_, p)| p).sum();
    let quotas: Vec<f64> = distribution
        .iter()
        .map(|(_, p)| p / total * f64::from(shots))
        .collect();
    let mut tally: Vec<u64> = quotas.iter().map(|q| q.floor() as u64).collect();

    let assigned: u64 = tally.iter().sum();
    let mut order: Vec<usize> = (0..quotas.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &idx in order
        .iter()
        .take((u64::from(shots).saturating_sub(assigned)) as usize)
    {
        tally[idx] += 1;
    }
    tally
}

/// Render a register value as a bitstring with classical bit 0 rightmost.
fn to_bitstring(value: u64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{value:0width$b}")
}
