//! The twenty-sphere tetrahedral pyramid and its square-lattice cross sections.
//!
//! Cells are numbered layer by layer from the bottom: 10 spheres, then 6, 3
//! and finally the apex. Within a layer the spheres run row by row from the
//! layer's front corner, each row left to right:
//!
//! ```text
//!        0            10          16        19
//!       1 2          11 12       17 18
//!      3 4 5       13 14 15
//!     6 7 8 9
//! ```
//!
//! Although the packing is triangular, each pair of opposite tetrahedron edges
//! defines a family of parallel planes that cut the pyramid into square
//! lattices. Flat pieces always lie in one of those planes, so placement can
//! be done entirely with 2D offsets.

use crate::pieces::Offset;

/// Number of spheres in the pyramid.
pub const CELL_COUNT: usize = 20;

/// Number of sphere layers (and of planes per view).
pub const LAYER_COUNT: usize = 4;

/// Number of views (families of parallel square-lattice planes).
pub const VIEW_COUNT: usize = 3;

/// First cell index of each layer, plus the total as a sentinel.
const LAYER_START: [usize; LAYER_COUNT + 1] = [0, 10, 16, 19, 20];

/// Weights of a cell toward the corner spheres 0, 6, 9 and 19.
///
/// The weights are non-negative and always sum to 3, the edge length of the
/// pyramid counted in sphere gaps.
pub type Barycentric = [i32; 4];

/// One flat cross section of the pyramid, viewed as a square lattice.
///
/// Entries map plane-local coordinates to cell indices. Their listing order is
/// the order in which the search tries anchors.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub entries: &'static [(Offset, usize)],
}

impl Plane {
    /// Returns the cell at the given plane-local coordinate, if it lies inside
    /// this cross section.
    #[inline]
    pub fn cell_at(&self, coord: Offset) -> Option<usize> {
        self.entries
            .iter()
            .find(|&&(key, _)| key == coord)
            .map(|&(_, cell)| cell)
    }

    /// Plane-local coordinates in listing order.
    #[inline]
    pub fn coords(&self) -> impl Iterator<Item = Offset> + '_ {
        self.entries.iter().map(|&(coord, _)| coord)
    }

    /// Cell indices covered by this plane.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(_, cell)| cell)
    }

    /// Number of cells in the plane.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Four stacked planes that together cover every cell exactly once.
pub type View = [Plane; LAYER_COUNT];

/// The three square-lattice decompositions of the pyramid, bottom plane first.
pub static VIEWS: [View; VIEW_COUNT] = [
    // planes parallel to edges 0-1-3-6 and 9-15-18-19
    [
        Plane {
            entries: &[((0, 0), 0), ((1, 0), 1), ((2, 0), 3), ((3, 0), 6)],
        },
        Plane {
            entries: &[
                ((0, 0), 2),
                ((0, 1), 10),
                ((1, 0), 4),
                ((1, 1), 11),
                ((2, 0), 7),
                ((2, 1), 13),
            ],
        },
        Plane {
            entries: &[
                ((0, 0), 5),
                ((0, 1), 12),
                ((0, 2), 16),
                ((1, 0), 8),
                ((1, 1), 14),
                ((1, 2), 17),
            ],
        },
        Plane {
            entries: &[((0, 0), 9), ((0, 1), 15), ((0, 2), 18), ((0, 3), 19)],
        },
    ],
    // planes parallel to edges 6-7-8-9 and 0-10-16-19
    [
        Plane {
            entries: &[((0, 0), 6), ((1, 0), 7), ((2, 0), 8), ((3, 0), 9)],
        },
        Plane {
            entries: &[
                ((0, 0), 3),
                ((0, 1), 13),
                ((1, 0), 4),
                ((1, 1), 14),
                ((2, 0), 5),
                ((2, 1), 15),
            ],
        },
        Plane {
            entries: &[
                ((0, 0), 1),
                ((0, 1), 11),
                ((0, 2), 17),
                ((1, 0), 2),
                ((1, 1), 12),
                ((1, 2), 18),
            ],
        },
        Plane {
            entries: &[((0, 0), 0), ((0, 1), 10), ((0, 2), 16), ((0, 3), 19)],
        },
    ],
    // planes parallel to edges 0-2-5-9 and 6-13-17-19
    [
        Plane {
            entries: &[((0, 0), 0), ((1, 0), 2), ((2, 0), 5), ((3, 0), 9)],
        },
        Plane {
            entries: &[
                ((0, 0), 1),
                ((0, 1), 10),
                ((1, 0), 4),
                ((1, 1), 12),
                ((2, 0), 8),
                ((2, 1), 15),
            ],
        },
        Plane {
            entries: &[
                ((0, 0), 3),
                ((0, 1), 11),
                ((0, 2), 16),
                ((1, 0), 7),
                ((1, 1), 14),
                ((1, 2), 18),
            ],
        },
        Plane {
            entries: &[((0, 0), 6), ((0, 1), 13), ((0, 2), 17), ((0, 3), 19)],
        },
    ],
];

/// Returns the barycentric weights of a cell.
///
/// A cell at layer `h`, row `r`, column `c` weighs `[3 - h - r, r - c, c, h]`.
pub const fn barycentric(cell: usize) -> Barycentric {
    let mut layer = 0;
    while cell >= LAYER_START[layer + 1] {
        layer += 1;
    }

    let index = cell - LAYER_START[layer];
    let mut row = 0;
    while (row + 1) * (row + 2) / 2 <= index {
        row += 1;
    }
    let column = index - row * (row + 1) / 2;

    let (h, r, c) = (layer as i32, row as i32, column as i32);
    [3 - h - r, r - c, c, h]
}

/// Converts barycentric weights back to a cell index.
pub const fn cell_at(weights: Barycentric) -> usize {
    let layer = weights[3] as usize;
    let column = weights[2] as usize;
    let row = (weights[1] + weights[2]) as usize;
    LAYER_START[layer] + row * (row + 1) / 2 + column
}

/// Squared distance between two sphere centres, doubled so it stays integral.
///
/// Spheres have unit diameter, so touching neighbours return 2.
pub const fn doubled_distance_squared(a: usize, b: usize) -> i32 {
    let (wa, wb) = (barycentric(a), barycentric(b));
    let mut sum = 0;
    let mut axis = 0;
    while axis < 4 {
        let delta = wa[axis] - wb[axis];
        sum += delta * delta;
        axis += 1;
    }
    sum
}

/// Layer (0 = bottom) that a cell belongs to.
pub const fn layer_of(cell: usize) -> usize {
    barycentric(cell)[3] as usize
}

/// Centre of a sphere in world units, with the pyramid standing on y = 0.
///
/// The base triangle lies in the xz plane with its centroid on the y axis.
pub fn sphere_center(cell: usize) -> [f32; 3] {
    let root3 = 3f32.sqrt();
    // corner spheres of a unit-edge tetrahedron: 0, 6, 9 and the apex 19
    let corners: [[f32; 3]; 4] = [
        [0.0, 0.0, -1.0 / root3],
        [-0.5, 0.0, root3 / 6.0],
        [0.5, 0.0, root3 / 6.0],
        [0.0, (2.0f32 / 3.0).sqrt(), 0.0],
    ];

    let weights = barycentric(cell);
    let mut center = [0.0f32; 3];
    for (weight, corner) in weights.iter().zip(corners.iter()) {
        for axis in 0..3 {
            center[axis] += *weight as f32 * corner[axis];
        }
    }
    center
}
