//! The [`Maze`] type: the board a user paints and a solver explores.
//!
//! A `Maze` owns a flat row-major array of [`CellValue`]s plus the location
//! of the single start and single end marker. All mutation goes through the
//! painting rules below; out-of-bounds requests are silently ignored so that
//! stale pointer coordinates never fault.

use crate::cell::{CellValue, Tool};
use crate::geom::{Extent, Point};

/// A rectangular board of [`CellValue`]s with at most one start and one end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<CellValue>,
    bounds: Extent,
    start: Option<Point>,
    end: Option<Point>,
}

impl Maze {
    /// Create a board of the given dimensions, every cell `Empty`.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Extent::new(width, height);
        Self {
            cells: vec![CellValue::Empty; bounds.len()],
            bounds,
            start: None,
            end: None,
        }
    }

    /// Reallocate the board at a new size, clearing every cell and both
    /// endpoint references.
    pub fn initialize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// The board dimensions.
    #[inline]
    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Location of the start marker, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Location of the end marker, if placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Read the cell at `p`, or `None` if `p` is off the board.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellValue> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Row-major view of every cell, for rendering.
    #[inline]
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Row-major iterator over `(Point, CellValue)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellValue)> + '_ {
        self.bounds.points().zip(self.cells.iter().copied())
    }

    /// Number of cells holding `value`.
    pub fn count(&self, value: CellValue) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    /// Apply a paint request. Returns whether the board changed.
    pub fn paint(&mut self, p: Point, tool: Tool) -> bool {
        match tool {
            Tool::Erase => self.erase(p),
            _ => self.set_cell(p, tool.value()),
        }
    }

    /// Set the cell at `p` following the painting rules.
    ///
    /// Placing a `Start` or `End` only succeeds on an `Empty`, `Frontier` or
    /// `Visited` cell, and moves an existing marker of the same kind (its old
    /// cell reverts to `Empty`). Any other value is written unless the target
    /// holds the start or end marker. Returns whether the board changed.
    pub fn set_cell(&mut self, p: Point, value: CellValue) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        let current = self.cells[i];
        match value {
            CellValue::Start | CellValue::End => {
                if !current.accepts_endpoint() {
                    return false;
                }
                let slot = if value == CellValue::Start {
                    &mut self.start
                } else {
                    &mut self.end
                };
                if let Some(old) = slot.replace(p) {
                    if let Some(oi) = self.bounds.index(old) {
                        self.cells[oi] = CellValue::Empty;
                    }
                }
                self.cells[i] = value;
                true
            }
            _ => {
                if current.is_endpoint() {
                    return false;
                }
                self.cells[i] = value;
                current != value
            }
        }
    }

    /// Reset the cell at `p` to `Empty`, whatever it holds. Erasing a marker
    /// also forgets its location.
    pub fn erase(&mut self, p: Point) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        match self.cells[i] {
            CellValue::Empty => return false,
            CellValue::Start => self.start = None,
            CellValue::End => self.end = None,
            _ => {}
        }
        self.cells[i] = CellValue::Empty;
        true
    }

    /// Write a search marking (`Frontier`, `Visited` or `Path`) at `p`.
    ///
    /// Start, end and wall cells keep their tag; a weighted cell may be
    /// recoloured. Returns whether the cell was written.
    pub fn mark(&mut self, p: Point, value: CellValue) -> bool {
        debug_assert!(value.is_search_marking());
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        match self.cells[i] {
            CellValue::Start | CellValue::End | CellValue::Wall => false,
            _ => {
                self.cells[i] = value;
                true
            }
        }
    }

    /// Reset every search marking to `Empty`, keeping walls, weights and the
    /// endpoints.
    pub fn clear_path(&mut self) {
        for c in self.cells.iter_mut() {
            if !matches!(
                c,
                CellValue::Wall | CellValue::Start | CellValue::End | CellValue::Weighted
            ) {
                *c = CellValue::Empty;
            }
        }
    }

    /// Reset everything except the endpoints to `Empty`.
    pub fn clear_walls(&mut self) {
        for c in self.cells.iter_mut() {
            if !c.is_endpoint() {
                *c = CellValue::Empty;
            }
        }
    }

    /// Append the in-bounds, non-wall orthogonal neighbours of `p` to `buf`
    /// in the order given by [`Point::neighbors_4`]. The caller clears `buf`.
    pub fn neighbors_4(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            match self.at(n) {
                Some(CellValue::Wall) | None => {}
                Some(_) => buf.push(n),
            }
        }
    }

    /// Save the current board so it can be restored after a search.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.clone(),
            bounds: self.bounds,
            start: self.start,
            end: self.end,
        }
    }

    /// Restore a board saved with [`snapshot`](Self::snapshot).
    ///
    /// Returns `false` and leaves the board alone if the snapshot was taken
    /// at a different size.
    pub fn restore(&mut self, snap: &Snapshot) -> bool {
        if snap.bounds != self.bounds {
            return false;
        }
        self.cells.copy_from_slice(&snap.cells);
        self.start = snap.start;
        self.end = snap.end;
        true
    }
}

/// A saved copy of a [`Maze`]'s cells and endpoint references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cells: Vec<CellValue>,
    bounds: Extent,
    start: Option<Point>,
    end: Option<Point>,
}

impl Snapshot {
    /// Read a saved cell.
    pub fn at(&self, p: Point) -> Option<CellValue> {
        self.bounds.index(p).map(|i| self.cells[i])
    }
}
