//! 20-Ball Pyramid Puzzle Solver Library
//!
//! Finds every way to build a four-layer tetrahedral stack of twenty spheres
//! from six flat pieces. The pyramid is sliced into square-lattice planes so
//! that pieces can be placed with plain 2D offsets.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod lattice;
pub mod persistence;
pub mod pieces;
pub mod solver;

pub use error::{Error, Result};
pub use grid::{Board, Solution};
pub use solver::{SearchOptions, SolutionSink, Solver, Symmetry};

/// Enumerates every solution of the puzzle, handing each board to `sink`.
///
/// Uses the default symmetry breaking and no limit. Returns the number of
/// solutions reported.
pub fn search<S: SolutionSink + ?Sized>(sink: &mut S) -> usize {
    Solver::new(pieces::PIECES, SearchOptions::default()).search(sink)
}
