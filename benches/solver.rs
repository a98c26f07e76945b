//! Benchmarks for the pyramid puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pyramid::geometry::all_orientations;
use pyramid::grid::{canonical_key, format_pyramid};
use pyramid::pieces::PIECES;
use pyramid::solver::{count, solve, SearchOptions, Symmetry};

/// Benchmark the complete search with the default symmetry breaking.
fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve_puzzle", |b| {
        b.iter(|| count(black_box(SearchOptions::default())))
    });
}

/// Benchmark the search without symmetry breaking (24x the solutions).
fn bench_solve_unrestricted(c: &mut Criterion) {
    let options = SearchOptions {
        symmetry: Symmetry::Unrestricted,
        limit: None,
    };
    c.bench_function("solve_unrestricted", |b| b.iter(|| count(black_box(options))));
}

/// Benchmark computing all orientations for the L piece.
fn bench_orientations(c: &mut Criterion) {
    let piece = PIECES[0].variants[0];

    c.bench_function("all_orientations", |b| {
        b.iter(|| all_orientations(black_box(piece)))
    });
}

/// Benchmark computing the canonical key for a solution.
fn bench_canonical_key(c: &mut Criterion) {
    let solutions = solve(SearchOptions::default());
    let solution = &solutions[0];

    c.bench_function("canonical_key", |b| {
        b.iter(|| canonical_key(black_box(solution)))
    });
}

/// Benchmark formatting a solution for display.
fn bench_format_pyramid(c: &mut Criterion) {
    let solutions = solve(SearchOptions::default());
    let solution = &solutions[0];

    c.bench_function("format_pyramid", |b| {
        b.iter(|| format_pyramid(black_box(solution)))
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_unrestricted,
    bench_orientations,
    bench_canonical_key,
    bench_format_pyramid
);
criterion_main!(benches);
