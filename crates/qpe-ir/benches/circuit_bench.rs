//! Benchmarks for circuit construction and inversion
//!
//! Run with: cargo bench -p qpe-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qpe_ir::{Circuit, ClbitId, QubitId};
use std::f64::consts::PI;

/// Fourier-style ladder: H on each qubit followed by controlled phases.
fn ladder(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("ladder", n, 0);
    for i in 0..n {
        circuit.h(QubitId(i)).unwrap();
        for j in (i + 1)..n {
            let angle = PI / f64::from(1u32 << (j - i));
            circuit.cp(angle, QubitId(j), QubitId(i)).unwrap();
        }
    }
    circuit
}

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit.h(black_box(QubitId(0))).unwrap();
        });
    });

    group.bench_function("cp_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit
                .cp(black_box(PI / 4.0), black_box(QubitId(0)), black_box(QubitId(1)))
                .unwrap();
        });
    });

    group.bench_function("measure", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 10);
        b.iter(|| {
            circuit
                .measure(black_box(QubitId(3)), black_box(ClbitId(3)))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark ladder construction, inversion, and composition
fn bench_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("ladder");

    for n in [4_u32, 8, 16, 24] {
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, &n| {
            b.iter(|| black_box(ladder(n)));
        });

        let circuit = ladder(n);
        group.bench_with_input(BenchmarkId::new("inverse", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.inverse().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("append", n), &circuit, |b, circuit| {
            b.iter(|| {
                let mut outer = Circuit::with_size("outer", n + 1, 0);
                outer.append(circuit, (1..=n).map(QubitId)).unwrap();
                black_box(outer)
            });
        });

        group.bench_with_input(BenchmarkId::new("depth", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.depth()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gate_addition, bench_ladder);

criterion_main!(benches);
