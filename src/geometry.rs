//! 2D rotation and reflection utilities for plane-local shapes.
//!
//! A square lattice has 8 symmetries fixing the origin: 4 rotations, each
//! optionally followed by a reflection. Inside the pyramid a reflected flat
//! piece is just the same piece turned over, so all 8 count as orientations.

use crate::pieces::Offset;

/// All 8 symmetries of the square lattice.
///
/// - Symmetries 0-3: rotations by 0, 90, 180 and 270 degrees
/// - Symmetries 4-7: the same rotations after mirroring across the i axis
pub const SQUARE_SYMMETRIES: [fn(Offset) -> Offset; 8] = [
    |(i, j)| (i, j),
    |(i, j)| (-j, i),
    |(i, j)| (-i, -j),
    |(i, j)| (j, -i),
    |(i, j)| (i, -j),
    |(i, j)| (j, i),
    |(i, j)| (-i, j),
    |(i, j)| (-j, -i),
];

/// Generates all distinct orientations of a shape.
///
/// Applies the 8 square symmetries, normalizes each result to the origin and
/// removes duplicates. Symmetric shapes have fewer than 8 orientations.
pub fn all_orientations(shape: &[Offset]) -> Vec<Vec<Offset>> {
    let mut orientations: Vec<Vec<Offset>> = SQUARE_SYMMETRIES
        .iter()
        .map(|transform| normalize_to_origin(shape.iter().map(|&cell| transform(cell)).collect()))
        .collect();

    orientations.sort();
    orientations.dedup();
    orientations
}

/// Translates offsets so the minimum i and j are zero, then sorts them.
///
/// Two shapes that differ only by translation or listing order normalize to
/// the same vector.
pub fn normalize_to_origin(mut cells: Vec<Offset>) -> Vec<Offset> {
    let min_i = cells.iter().map(|&(i, _)| i).min().unwrap_or(0);
    let min_j = cells.iter().map(|&(_, j)| j).min().unwrap_or(0);

    for (i, j) in &mut cells {
        *i -= min_i;
        *j -= min_j;
    }

    cells.sort_unstable();
    cells
}

/// Re-anchors a normalized shape on its first cell so that it contains (0, 0).
pub fn anchor_on_first(cells: &[Offset]) -> Vec<Offset> {
    match cells.first() {
        Some(&(ai, aj)) => cells.iter().map(|&(i, j)| (i - ai, j - aj)).collect(),
        None => Vec::new(),
    }
}
