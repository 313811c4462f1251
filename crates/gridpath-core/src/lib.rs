//! **gridpath-core**: the grid model behind the gridpath sandbox.
//!
//! A [`Maze`] is a fixed-size board of [`CellValue`]s that a user paints with
//! walls, weighted cells, a start and an end. The search engine in
//! `gridpath-search` reads and marks the same board while it explores.

pub mod cell;
pub mod geom;
pub mod layout;
pub mod maze;

pub use cell::{CellValue, Tool};
pub use geom::{Extent, Point};
pub use layout::LayoutError;
pub use maze::{Maze, Snapshot};
