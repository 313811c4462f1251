//! Per-run cell costs.

use gridpath_core::{CellValue, Extent, Maze, Point};
use rand::{Rng, RngExt};

/// Cost of entering each cell, laid out like the board.
///
/// Every cell costs 1 except weighted cells, which cost the configured
/// weight, and the start, which costs 0. Rebuilt at the start of every
/// weighted search. Held as `u64` so running totals over a board of
/// `u32::MAX` weights never overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    costs: Vec<u64>,
    bounds: Extent,
}

impl WeightTable {
    /// Build the table for `maze` with weighted cells costing `weight`.
    pub fn build(maze: &Maze, weight: u32) -> Self {
        let weight = u64::from(weight);
        let mut costs: Vec<u64> = maze
            .cells()
            .iter()
            .map(|&c| if c == CellValue::Weighted { weight } else { 1 })
            .collect();
        if let Some(si) = maze.start().and_then(|s| maze.bounds().index(s)) {
            costs[si] = 0;
        }
        Self {
            costs,
            bounds: maze.bounds(),
        }
    }

    /// Cost at a flat index.
    #[inline]
    pub fn get(&self, idx: usize) -> u64 {
        self.costs[idx]
    }

    /// Mutable cost at a flat index.
    #[inline]
    pub(crate) fn get_mut(&mut self, idx: usize) -> &mut u64 {
        &mut self.costs[idx]
    }

    /// Cost at `p`, or `None` off the board.
    pub fn at(&self, p: Point) -> Option<u64> {
        self.bounds.index(p).map(|i| self.costs[i])
    }
}

/// Mark about half the board as weighted.
///
/// Draws `width * height / 2` cells uniformly with replacement, so fewer
/// distinct cells may end up weighted. The start and end are never touched.
/// Returns the number of draws that changed a cell.
pub fn scatter_weights(maze: &mut Maze, rng: &mut impl Rng) -> usize {
    let (w, h) = (maze.width(), maze.height());
    if w <= 0 || h <= 0 {
        return 0;
    }
    let draws = (w as usize * h as usize) / 2;
    let mut changed = 0;
    for _ in 0..draws {
        let p = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        if maze.set_cell(p, CellValue::Weighted) {
            changed += 1;
        }
    }
    changed
}
