//! Exhaustive backtracking search for pyramid tilings.
//!
//! Pieces are placed in catalog order, one per recursion level. At each level
//! every shape of the current piece is tried in every admitted view, every
//! plane of that view and every anchor of that plane. A feasible placement is
//! written to the board, the next level is searched, and the placement is
//! removed again before the next candidate, so sibling candidates never see
//! each other's cells.
//!
//! Symmetry handling: the three views are images of each other under the
//! pyramid's rotations, and the pinned piece has no symmetry of its own.
//! Restricting it to one orientation in the first view keeps exactly one
//! representative of every solution class.

use std::ops::ControlFlow;

use log::{debug, trace};

use crate::geometry::{all_orientations, anchor_on_first};
use crate::grid::{Board, Solution};
use crate::lattice::{Plane, View, VIEWS};
use crate::pieces::{Offset, Piece, MAX_CELLS, PIECES};

/// How the search treats the pinned piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Symmetry {
    /// Pinned piece in one orientation, first view only.
    #[default]
    Fixed,
    /// Pinned piece in its listed orientation, but in all three views.
    AllViews,
    /// Pinned piece in all eight planar orientations and all three views.
    Unrestricted,
}

/// Search configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub symmetry: Symmetry,
    /// Stop after this many solutions have been reported.
    pub limit: Option<usize>,
}

/// Receives each complete assignment while the search is paused on it.
///
/// The board is only borrowed for the duration of the call; implementations
/// copy out whatever they want to keep.
pub trait SolutionSink {
    fn on_solution(&mut self, board: &Board);
}

impl<F: FnMut(&Board)> SolutionSink for F {
    fn on_solution(&mut self, board: &Board) {
        self(board)
    }
}

/// A piece prepared for the search: its shapes and the views it may use.
struct Candidate {
    symbol: u8,
    shapes: Vec<Vec<Offset>>,
    views: &'static [View],
}

impl Candidate {
    fn new(piece: &Piece, symmetry: Symmetry) -> Self {
        let (shapes, views): (Vec<Vec<Offset>>, &'static [View]) = match (piece.pinned, symmetry) {
            (true, Symmetry::Fixed) => (listed_shapes(piece), &VIEWS[..1]),
            (true, Symmetry::Unrestricted) => (
                all_orientations(piece.variants[0])
                    .iter()
                    .map(|orientation| anchor_on_first(orientation))
                    .collect(),
                &VIEWS[..],
            ),
            _ => (listed_shapes(piece), &VIEWS[..]),
        };

        Self {
            symbol: piece.symbol,
            shapes,
            views,
        }
    }
}

fn listed_shapes(piece: &Piece) -> Vec<Vec<Offset>> {
    piece.variants.iter().map(|variant| variant.to_vec()).collect()
}

/// Cells covered by one feasible placement.
///
/// Uses a fixed-size array to avoid heap allocation in the search loop.
#[derive(Clone, Copy)]
struct Placement {
    cells: [usize; MAX_CELLS],
    cell_count: u8,
}

impl Placement {
    #[inline]
    fn cells(&self) -> &[usize] {
        &self.cells[..self.cell_count as usize]
    }
}

/// Attempts to put a shape into a plane with its (0, 0) offset at `anchor`.
///
/// Returns `None` if any cell would leave the plane or is already covered.
#[inline]
fn try_create_placement(
    shape: &[Offset],
    plane: &Plane,
    anchor: Offset,
    board: &Board,
) -> Option<Placement> {
    let mut placement = Placement {
        cells: [0; MAX_CELLS],
        cell_count: 0,
    };

    for &(di, dj) in shape {
        let cell = plane.cell_at((anchor.0 + di, anchor.1 + dj))?;
        if !board.is_free(cell) {
            return None;
        }
        placement.cells[placement.cell_count as usize] = cell;
        placement.cell_count += 1;
    }

    Some(placement)
}

/// Mutable state threaded through the recursion.
struct SearchState {
    board: Board,
    /// Cells covered by the pieces currently on the board.
    covered: usize,
    found: usize,
    limit: Option<usize>,
}

/// Places `candidates[depth..]` on the board in every possible way.
fn place_from<S: SolutionSink + ?Sized>(
    candidates: &[Candidate],
    depth: usize,
    state: &mut SearchState,
    sink: &mut S,
) -> ControlFlow<()> {
    let Some(candidate) = candidates.get(depth) else {
        // every piece is placed
        state.found += 1;
        trace!(
            "solution #{}: {}",
            state.found,
            String::from_utf8_lossy(state.board.cells())
        );
        sink.on_solution(&state.board);

        return match state.limit {
            Some(limit) if state.found >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        };
    };

    for shape in &candidate.shapes {
        for view in candidate.views {
            for plane in view {
                for anchor in plane.coords() {
                    let Some(placement) = try_create_placement(shape, plane, anchor, &state.board)
                    else {
                        continue;
                    };

                    state.board.place(candidate.symbol, placement.cells());
                    state.covered += placement.cells().len();
                    debug_assert_eq!(state.board.occupied_count(), state.covered);

                    let flow = place_from(candidates, depth + 1, state, sink);

                    state.board.unplace(placement.cells());
                    state.covered -= placement.cells().len();

                    if flow.is_break() {
                        return flow;
                    }
                }
            }
        }
    }

    ControlFlow::Continue(())
}

/// Backtracking search engine over a list of pieces.
///
/// With the full catalog a reported board covers all 20 cells. With a shorter
/// list the sink fires once every listed piece has been placed.
pub struct Solver {
    candidates: Vec<Candidate>,
    state: SearchState,
}

impl Solver {
    pub fn new(pieces: &[Piece], options: SearchOptions) -> Self {
        Self {
            candidates: pieces
                .iter()
                .map(|piece| Candidate::new(piece, options.symmetry))
                .collect(),
            state: SearchState {
                board: Board::new(),
                covered: 0,
                found: 0,
                limit: options.limit,
            },
        }
    }

    /// The board the search works on; empty whenever no search is running.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Runs the search to exhaustion (or to the limit) and returns how many
    /// solutions were reported to `sink`.
    pub fn search<S: SolutionSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        self.state.found = 0;
        if self.state.limit == Some(0) {
            return 0;
        }

        debug!(
            "searching {} pieces, limit {:?}",
            self.candidates.len(),
            self.state.limit
        );
        // the result only says whether the limit was hit
        let _ = place_from(&self.candidates, 0, &mut self.state, sink);
        debug!("search finished with {} solutions", self.state.found);

        self.state.found
    }
}

/// Searches the full catalog and returns every solution in discovery order.
pub fn solve(options: SearchOptions) -> Vec<Solution> {
    let mut solutions = Vec::new();
    Solver::new(PIECES, options).search(&mut |board: &Board| solutions.push(board.snapshot()));
    solutions
}

/// Searches the full catalog and only counts the solutions.
pub fn count(options: SearchOptions) -> usize {
    Solver::new(PIECES, options).search(&mut |_: &Board| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::count_distinct;
    use crate::lattice::CELL_COUNT;

    fn with_symmetry(symmetry: Symmetry) -> SearchOptions {
        SearchOptions {
            symmetry,
            limit: None,
        }
    }

    #[test]
    fn test_solution_count() {
        assert_eq!(count(SearchOptions::default()), 2);
    }

    #[test]
    fn test_solutions_in_discovery_order() {
        let solutions = solve(SearchOptions::default());
        assert_eq!(&solutions[0], b"iTLdLvdLvIiTTLvIiTII");
        assert_eq!(&solutions[1], b"ITLdLvdLviITTLviITiI");
    }

    #[test]
    fn test_solutions_cover_every_cell_with_correct_piece_sizes() {
        for solution in solve(SearchOptions::default()) {
            for piece in PIECES {
                let covered = solution.iter().filter(|&&slot| slot == piece.symbol).count();
                assert_eq!(covered, piece.cell_count(), "{}", piece.name());
            }
        }
    }

    #[test]
    fn test_sink_sees_full_board() {
        let mut solver = Solver::new(PIECES, SearchOptions::default());
        let mut checked = 0;
        solver.search(&mut |board: &Board| {
            assert_eq!(board.occupied_count(), CELL_COUNT);
            assert!((0..CELL_COUNT).all(|cell| board.symbol_at(cell).is_some()));
            checked += 1;
        });
        assert_eq!(checked, 2);
    }

    #[test]
    fn test_board_is_empty_after_search() {
        let mut solver = Solver::new(PIECES, SearchOptions::default());
        let found = solver.search(&mut |_: &Board| {});
        assert_eq!(found, 2);
        assert!(solver.board().is_empty());

        // a second run on the same solver starts from a clean board
        assert_eq!(solver.search(&mut |_: &Board| {}), 2);
        assert!(solver.board().is_empty());
    }

    #[test]
    fn test_search_is_deterministic() {
        let first = solve(SearchOptions::default());
        let second = solve(SearchOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_solutions_are_distinct_up_to_symmetry() {
        let solutions = solve(SearchOptions::default());
        assert_eq!(count_distinct(&solutions), solutions.len());
    }

    #[test]
    fn test_all_views_triples_the_count() {
        let solutions = solve(with_symmetry(Symmetry::AllViews));
        assert_eq!(solutions.len(), 3 * count(SearchOptions::default()));
        assert_eq!(count_distinct(&solutions), 2);
    }

    #[test]
    fn test_unrestricted_finds_every_symmetric_copy() {
        // 24 symmetries of the pyramid, none of which fixes a solution
        let solutions = solve(with_symmetry(Symmetry::Unrestricted));
        assert_eq!(solutions.len(), 24 * count(SearchOptions::default()));
        assert_eq!(count_distinct(&solutions), 2);

        let fixed = solve(SearchOptions::default());
        assert!(fixed.iter().all(|solution| solutions.contains(solution)));
    }

    #[test]
    fn test_limit_stops_early_and_restores_board() {
        let options = SearchOptions {
            symmetry: Symmetry::Unrestricted,
            limit: Some(5),
        };
        let mut solver = Solver::new(PIECES, options);
        let mut seen = Vec::new();
        let found = solver.search(&mut |board: &Board| seen.push(board.snapshot()));

        assert_eq!(found, 5);
        assert_eq!(seen.len(), 5);
        assert!(solver.board().is_empty());

        let full = solve(with_symmetry(Symmetry::Unrestricted));
        assert_eq!(seen[..], full[..5]);
    }

    #[test]
    fn test_zero_limit_reports_nothing() {
        let options = SearchOptions {
            symmetry: Symmetry::Fixed,
            limit: Some(0),
        };
        assert_eq!(count(options), 0);
    }

    #[test]
    fn test_partial_catalog_invariant() {
        let pieces = &PIECES[..3];
        let mut solver = Solver::new(pieces, SearchOptions::default());
        let found = solver.search(&mut |board: &Board| {
            assert_eq!(board.occupied_count(), 12);
            for piece in pieces {
                let covered = board.cells().iter().filter(|&&s| s == piece.symbol).count();
                assert_eq!(covered, piece.cell_count());
            }
        });
        assert_eq!(found, 8);
        assert!(solver.board().is_empty());
    }

    #[test]
    fn test_pinned_piece_has_a_single_placement() {
        let mut solver = Solver::new(&PIECES[..1], SearchOptions::default());
        let mut cells = Vec::new();
        solver.search(&mut |board: &Board| {
            cells = (0..CELL_COUNT).filter(|&cell| !board.is_free(cell)).collect();
        });
        // the L only fits the 3x2 plane of the first view
        assert_eq!(cells, vec![2, 4, 7, 13]);
    }

    #[test]
    fn test_empty_piece_list_reports_the_empty_board() {
        let mut solver = Solver::new(&[], SearchOptions::default());
        let mut empty = false;
        assert_eq!(solver.search(&mut |board: &Board| empty = board.is_empty()), 1);
        assert!(empty);
    }

    struct Tally {
        boards: usize,
    }

    impl SolutionSink for Tally {
        fn on_solution(&mut self, _board: &Board) {
            self.boards += 1;
        }
    }

    #[test]
    fn test_struct_sink() {
        let mut tally = Tally { boards: 0 };
        let found = Solver::new(PIECES, with_symmetry(Symmetry::AllViews)).search(&mut tally);
        assert_eq!(tally.boards, found);
        assert_eq!(found, 6);
    }
}
