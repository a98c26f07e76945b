//! Puzzle piece definitions and plane-local coordinate types.
//!
//! Every piece is flat: it always lies inside one square-lattice plane of the
//! pyramid, so its shapes are written as 2D offsets from an anchor at (0, 0).

/// A 2D displacement `(di, dj)` within one square-lattice plane.
pub type Offset = (i32, i32);

/// Maximum number of cells in any single piece.
pub const MAX_CELLS: usize = 4;

/// A puzzle piece and the orientation variants the search tries for it.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    /// ASCII tag written into the board for each covered cell.
    pub symbol: u8,
    /// Orientation variants, each anchored so that it contains (0, 0).
    pub variants: &'static [&'static [Offset]],
    /// Whether the piece is pinned to a single orientation in the first view.
    ///
    /// Exactly one asymmetric piece is pinned; this removes the duplicates the
    /// pyramid's rotations and reflections would otherwise produce.
    pub pinned: bool,
}

impl Piece {
    /// Number of cells the piece covers.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.variants[0].len()
    }

    /// The piece tag as a printable character.
    #[inline]
    pub fn name(&self) -> char {
        char::from(self.symbol)
    }
}

/// The six pieces, in the order the search places them.
///
/// Large pieces go first to keep the search tree narrow near the root.
pub const PIECES: &[Piece] = &[
    // L-shaped piece (4 cells), pinned to one orientation
    Piece {
        symbol: b'L',
        variants: &[&[(0, 0), (1, 0), (2, 0), (2, 1)]],
        pinned: true,
    },
    // T-shaped piece (4 cells)
    Piece {
        symbol: b'T',
        variants: &[
            &[(0, 0), (0, 1), (0, 2), (1, 1)],
            &[(0, 0), (1, 0), (1, 1), (2, 0)],
            &[(-1, 1), (0, 0), (0, 1), (0, 2)],
            &[(-1, 1), (0, 0), (0, 1), (1, 1)],
        ],
        pinned: false,
    },
    // long straight piece (4 cells)
    Piece {
        symbol: b'I',
        variants: &[
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
            &[(0, 0), (0, 1), (0, 2), (0, 3)],
        ],
        pinned: false,
    },
    // small corner piece (3 cells)
    Piece {
        symbol: b'v',
        variants: &[
            &[(0, 0), (1, 0), (1, 1)],
            &[(-1, 1), (0, 0), (0, 1)],
            &[(0, 0), (0, 1), (1, 1)],
            &[(0, 0), (0, 1), (1, 0)],
        ],
        pinned: false,
    },
    // short straight piece (3 cells)
    Piece {
        symbol: b'i',
        variants: &[&[(0, 0), (1, 0), (2, 0)], &[(0, 0), (0, 1), (0, 2)]],
        pinned: false,
    },
    // domino (2 cells)
    Piece {
        symbol: b'd',
        variants: &[&[(0, 0), (1, 0)], &[(0, 0), (0, 1)]],
        pinned: false,
    },
];

/// Looks up a catalog piece by its board symbol.
pub fn piece_by_symbol(symbol: u8) -> Option<&'static Piece> {
    PIECES.iter().find(|piece| piece.symbol == symbol)
}
