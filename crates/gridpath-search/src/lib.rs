//! Stepwise shortest-path search over [`gridpath_core::Maze`] boards.
//!
//! Three algorithms are available:
//!
//! - **BFS** ignores weights and finds a path with the fewest moves
//! - **Dijkstra** finds the cheapest path when weighted cells cost more
//! - **A\*** finds the cheapest path guided by a distance [`Heuristic`]
//!
//! A [`Solver`] owns the board and drives one run at a time. The caller
//! decides the pacing: every [`Solver::step`] expands one frontier cell, or
//! walks the backtrace one cell, and paints the result onto the board so a
//! renderer can show the search unfolding.
//!
//! # Example
//!
//! ```
//! use gridpath_core::Maze;
//! use gridpath_search::{Algorithm, RunParams, Solver, Status};
//!
//! let maze = Maze::from_layout("S..#\n.#..\n...E").unwrap();
//! let mut solver = Solver::new(maze);
//! solver.run(RunParams::new(Algorithm::Astar)).unwrap();
//! let summary = solver.run_to_completion().unwrap();
//! assert_eq!(summary.status, Status::Found);
//! assert_eq!(summary.path_length, Some(5));
//! ```

mod astar;
mod bfs;
mod config;
mod dijkstra;
mod distance;
mod error;
mod pqueue;
mod search;
mod solver;
mod weights;

pub use config::{Algorithm, Heuristic, ParamsError, RunParams};
pub use distance::{euclidean, manhattan};
pub use error::SearchError;
pub use pqueue::PriorityQueue;
pub use solver::{Phase, Progress, Solver, Status, Summary};
pub use weights::{WeightTable, scatter_weights};
