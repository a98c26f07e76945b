//! Board representation and whole-pyramid operations.
//!
//! The board is a flat array with one slot per sphere. Each slot holds the
//! ASCII symbol of the piece covering it, or 0 while empty.

use rustc_hash::FxHashSet;

use crate::lattice::{barycentric, cell_at, CELL_COUNT};

/// Slot value of an uncovered cell.
pub const EMPTY: u8 = 0;

/// An owned copy of all board slots, kept after the search has moved on.
pub type Solution = [u8; CELL_COUNT];

/// Number of symmetries of the pyramid (rotations and reflections).
const NUM_SYMMETRIES: usize = 24;

/// The in-progress assignment of pieces to cells.
///
/// `place` and `unplace` are only ever called by the search engine, which
/// checks that target cells are empty beforehand. Everyone else gets a shared
/// borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Solution,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with every cell empty.
    pub const fn new() -> Self {
        Self {
            cells: [EMPTY; CELL_COUNT],
        }
    }

    /// Marks each of `cells` as covered by `symbol`.
    ///
    /// All target cells must currently be empty.
    #[inline]
    pub fn place(&mut self, symbol: u8, cells: &[usize]) {
        for &cell in cells {
            debug_assert_eq!(self.cells[cell], EMPTY, "cell {cell} is already covered");
            self.cells[cell] = symbol;
        }
    }

    /// Resets each of `cells` to empty.
    #[inline]
    pub fn unplace(&mut self, cells: &[usize]) {
        for &cell in cells {
            self.cells[cell] = EMPTY;
        }
    }

    /// Whether a cell is uncovered.
    #[inline]
    pub fn is_free(&self, cell: usize) -> bool {
        self.cells[cell] == EMPTY
    }

    /// All slots, indexed by cell.
    #[inline]
    pub fn cells(&self) -> &Solution {
        &self.cells
    }

    /// The symbol covering a cell, if any.
    pub fn symbol_at(&self, cell: usize) -> Option<char> {
        match self.cells[cell] {
            EMPTY => None,
            symbol => Some(char::from(symbol)),
        }
    }

    /// Number of covered cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&slot| slot != EMPTY).count()
    }

    /// Whether no cell is covered.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&slot| slot == EMPTY)
    }

    /// Copies the current assignment out of the board.
    #[inline]
    pub fn snapshot(&self) -> Solution {
        self.cells
    }
}

/// Builds the symmetry lookup table at compile time.
///
/// Every symmetry of a regular tetrahedron permutes its four corners, and all
/// 24 permutations occur. Permuting the barycentric weights of a cell therefore
/// gives its image; `table[sym][src]` is where `src` ends up.
const fn build_symmetry_table() -> [[u8; CELL_COUNT]; NUM_SYMMETRIES] {
    let mut table = [[0u8; CELL_COUNT]; NUM_SYMMETRIES];
    let mut sym = 0;

    // permutations in lexicographic order, so the identity comes first
    let mut a = 0;
    while a < 4 {
        let mut b = 0;
        while b < 4 {
            let mut c = 0;
            while c < 4 {
                if a != b && a != c && b != c {
                    // the three distinct axes leave exactly one for the apex
                    let axes = [a, b, c, 6 - a - b - c];
                    let mut src = 0;
                    while src < CELL_COUNT {
                        let weights = barycentric(src);
                        let image = [
                            weights[axes[0]],
                            weights[axes[1]],
                            weights[axes[2]],
                            weights[axes[3]],
                        ];
                        table[sym][src] = cell_at(image) as u8;
                        src += 1;
                    }
                    sym += 1;
                }
                c += 1;
            }
            b += 1;
        }
        a += 1;
    }
    table
}

/// Image of every cell under every pyramid symmetry.
static SYMMETRY_TABLE: [[u8; CELL_COUNT]; NUM_SYMMETRIES] = build_symmetry_table();

/// Computes the canonical form of a solution under rotations and reflections.
///
/// Two solutions are the same physical arrangement exactly when their keys
/// are equal.
pub fn canonical_key(solution: &Solution) -> Solution {
    let mut smallest = *solution;

    // identity is entry 0 and already covered by the initial value
    for mapping in &SYMMETRY_TABLE[1..] {
        let mut image = [EMPTY; CELL_COUNT];
        for (source_cell, &dest_cell) in mapping.iter().enumerate() {
            image[dest_cell as usize] = solution[source_cell];
        }

        if image < smallest {
            smallest = image;
        }
    }

    smallest
}

/// Counts the solutions that remain once symmetric copies are merged.
pub fn count_distinct(solutions: &[Solution]) -> usize {
    solutions
        .iter()
        .map(canonical_key)
        .collect::<FxHashSet<Solution>>()
        .len()
}

/// Layered drawing of the pyramid; the digit in each slot names its layer.
const PYRAMID_TEMPLATE: &str = r"
         (0)
         / \
        /   \                   (1)
      (0)---(0)                 / \
      / \   / \                /   \             (2)
     /   \ /   \             (1)---(1)           / \
   (0)---(0)---(0)           / \   / \          /   \       (3)
   / \   / \   / \          /   \ /   \       (2)---(2)
  /   \ /   \ /   \       (1)---(1)---(1)
(0)---(0)---(0)---(0)
";

/// Formats a board as four triangular layers drawn side by side.
///
/// Layers go bottom to top from left to right. Empty cells show as '.'.
pub fn format_pyramid(cells: &Solution) -> String {
    let mut output: Vec<char> = PYRAMID_TEMPLATE.chars().collect();
    let mut next_cell = 0;

    // cells are numbered layer by layer, matching a scan of digit 0, then 1...
    for layer_digit in ['0', '1', '2', '3'] {
        for slot in output.iter_mut().filter(|ch| **ch == layer_digit) {
            *slot = match cells[next_cell] {
                EMPTY => '.',
                symbol => char::from(symbol),
            };
            next_cell += 1;
        }
    }

    output.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{doubled_distance_squared, layer_of};

    /// First solution found by the default search.
    const FIRST: &[u8; CELL_COUNT] = b"iTLdLvdLvIiTTLvIiTII";

    #[test]
    fn test_identity_symmetry_is_unchanged() {
        for cell in 0..CELL_COUNT {
            assert_eq!(
                SYMMETRY_TABLE[0][cell], cell as u8,
                "Identity should not move cell {cell}"
            );
        }
    }

    #[test]
    fn test_symmetries_are_permutations() {
        for (sym, mapping) in SYMMETRY_TABLE.iter().enumerate() {
            let mut seen = [false; CELL_COUNT];
            for (src, &dest) in mapping.iter().enumerate() {
                let dest = dest as usize;
                assert!(dest < CELL_COUNT, "Symmetry {sym} maps {src} out of bounds");
                assert!(!seen[dest], "Symmetry {sym} maps two cells to {dest}");
                seen[dest] = true;
            }
        }
    }

    #[test]
    fn test_symmetries_preserve_distances() {
        for mapping in &SYMMETRY_TABLE {
            for a in 0..CELL_COUNT {
                for b in 0..CELL_COUNT {
                    assert_eq!(
                        doubled_distance_squared(a, b),
                        doubled_distance_squared(mapping[a] as usize, mapping[b] as usize)
                    );
                }
            }
        }
    }

    #[test]
    fn test_symmetries_are_distinct() {
        let mut mappings = SYMMETRY_TABLE.to_vec();
        mappings.sort();
        mappings.dedup();
        assert_eq!(mappings.len(), NUM_SYMMETRIES);
    }

    #[test]
    fn test_place_then_unplace_restores_board() {
        let mut board = Board::new();
        board.place(b'T', &[2, 4, 7, 11]);
        let before = board.clone();

        board.place(b'd', &[0, 1]);
        assert_eq!(board.occupied_count(), 6);
        assert_eq!(board.symbol_at(1), Some('d'));
        board.unplace(&[0, 1]);

        assert_eq!(board, before);
        board.unplace(&[2, 4, 7, 11]);
        assert!(board.is_empty());
    }

    #[test]
    fn test_unplace_is_idempotent() {
        let mut board = Board::new();
        board.place(b'i', &[5, 8, 9]);
        board.unplace(&[5, 8, 9]);
        board.unplace(&[5, 8, 9]);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_canonical_key_is_symmetry_invariant() {
        let key = canonical_key(FIRST);
        for mapping in &SYMMETRY_TABLE {
            let mut image = [EMPTY; CELL_COUNT];
            for (src, &dest) in mapping.iter().enumerate() {
                image[dest as usize] = FIRST[src];
            }
            assert_eq!(canonical_key(&image), key);
        }
    }

    #[test]
    fn test_count_distinct_merges_images() {
        let mut rotated = [EMPTY; CELL_COUNT];
        for (src, &dest) in SYMMETRY_TABLE[5].iter().enumerate() {
            rotated[dest as usize] = FIRST[src];
        }
        assert_ne!(&rotated, FIRST);
        assert_eq!(count_distinct(&[*FIRST, rotated]), 1);
    }

    #[test]
    fn test_format_pyramid_fills_layers_in_order() {
        let mut cells = [EMPTY; CELL_COUNT];
        for (cell, slot) in cells.iter_mut().enumerate() {
            *slot = b'0' + layer_of(cell) as u8;
        }
        let text = format_pyramid(&cells);
        assert_eq!(text, PYRAMID_TEMPLATE);
    }

    #[test]
    fn test_format_pyramid_shows_empty_cells() {
        let text = format_pyramid(&Board::new().snapshot());
        assert_eq!(text.matches("(.)").count(), CELL_COUNT);
        assert!(!text.contains(|ch: char| ch.is_ascii_digit()));
    }

    #[test]
    fn test_format_pyramid_apex() {
        let text = format_pyramid(FIRST);
        let first_line = text.lines().nth(1).unwrap_or_default();
        assert_eq!(first_line.trim(), "(i)");
        assert!(text.contains("(I)\n"));
    }
}
