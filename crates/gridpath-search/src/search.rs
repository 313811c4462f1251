//! Per-run search state shared by BFS, Dijkstra and A*.
//!
//! A [`Search`] is created when a run starts and dropped when it ends. Each
//! algorithm lives in its own module as an `impl Search` block providing a
//! single-expansion step; this module holds the shared bookkeeping and the
//! backtrace walk.

use std::collections::VecDeque;

use gridpath_core::{CellValue, Extent, Maze, Point};

use crate::config::{Algorithm, Heuristic, RunParams};
use crate::error::SearchError;
use crate::pqueue::PriorityQueue;
use crate::weights::WeightTable;

/// Sentinel for "no predecessor recorded".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Sentinel for an unknown best cost.
pub(crate) const UNREACHABLE: u64 = u64::MAX;

/// Discovered-but-unexpanded cells.
#[derive(Debug)]
pub(crate) enum Frontier {
    Fifo(VecDeque<usize>),
    Priority(PriorityQueue<usize>),
}

impl Frontier {
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Self::Fifo(q) => q.is_empty(),
            Self::Priority(q) => q.is_empty(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Search {
    pub(crate) algorithm: Algorithm,
    pub(crate) heuristic: Heuristic,
    pub(crate) bounds: Extent,
    pub(crate) start: usize,
    pub(crate) end: usize,
    /// BFS and Dijkstra settle on discovery, A* on expansion.
    pub(crate) settled: Vec<bool>,
    pub(crate) parent: Vec<usize>,
    /// Best known cost from the start (A* only).
    pub(crate) cost: Vec<u64>,
    pub(crate) weights: WeightTable,
    pub(crate) frontier: Frontier,
    pub(crate) nodes_searched: usize,
    pub(crate) nodes_expanded: usize,
    pub(crate) found: bool,
    cursor: usize,
    pub(crate) path_length: usize,
    pub(crate) nbuf: Vec<Point>,
}

impl Search {
    /// Allocate the state for a run from `start` to `end` on `maze` and seed
    /// the frontier.
    pub(crate) fn new(maze: &Maze, params: &RunParams, start: Point, end: Point) -> Option<Self> {
        let bounds = maze.bounds();
        let si = bounds.index(start)?;
        let ei = bounds.index(end)?;
        let len = bounds.len();
        let frontier = match params.algorithm {
            Algorithm::Bfs => Frontier::Fifo(VecDeque::new()),
            Algorithm::Dijkstra | Algorithm::Astar => Frontier::Priority(PriorityQueue::new()),
        };
        let mut search = Self {
            algorithm: params.algorithm,
            heuristic: params.heuristic,
            bounds,
            start: si,
            end: ei,
            settled: vec![false; len],
            parent: vec![NO_PARENT; len],
            cost: vec![UNREACHABLE; len],
            weights: WeightTable::build(maze, params.weight),
            frontier,
            nodes_searched: 1,
            nodes_expanded: 0,
            found: false,
            cursor: ei,
            path_length: 0,
            nbuf: Vec::with_capacity(4),
        };
        match search.algorithm {
            Algorithm::Bfs => search.seed_bfs(),
            Algorithm::Dijkstra => search.seed_dijkstra(),
            Algorithm::Astar => search.seed_astar(),
        }
        Some(search)
    }

    /// Expand one frontier cell with the configured algorithm.
    pub(crate) fn expand(&mut self, maze: &mut Maze) {
        if self.found {
            return;
        }
        match self.algorithm {
            Algorithm::Bfs => self.bfs_step(maze),
            Algorithm::Dijkstra => self.dijkstra_step(maze),
            Algorithm::Astar => self.astar_step(maze),
        }
    }

    /// The frontier ran dry without reaching the end.
    pub(crate) fn exhausted(&self) -> bool {
        !self.found && self.frontier.is_empty()
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.bounds.point(idx)
    }

    /// Gather the walkable neighbours of `p` into `self.nbuf`.
    pub(crate) fn collect_neighbors(&mut self, maze: &Maze, p: Point) {
        self.nbuf.clear();
        maze.neighbors_4(p, &mut self.nbuf);
    }

    /// Record that `child` was reached from `parent` and flag the end.
    pub(crate) fn discover(&mut self, maze: &mut Maze, child: usize, parent: usize) {
        self.parent[child] = parent;
        if child == self.end {
            self.found = true;
        } else {
            maze.mark(self.point(child), CellValue::Frontier);
        }
    }

    /// Move the backtrace cursor one cell towards the start, marking the cell
    /// it leaves as path. Returns `true` once the cursor sits on the start.
    pub(crate) fn backtrace_step(&mut self, maze: &mut Maze) -> Result<bool, SearchError> {
        if self.cursor == self.start {
            return Ok(true);
        }
        let at = self.point(self.cursor);
        maze.mark(at, CellValue::Path);
        let next = self.parent[self.cursor];
        // A well-formed chain is never longer than the board.
        if next == NO_PARENT || self.path_length >= self.bounds.len() {
            return Err(SearchError::BacktraceBroken { at });
        }
        self.cursor = next;
        self.path_length += 1;
        Ok(self.cursor == self.start)
    }

    /// The start-to-end path, if the end was reached and the chain is intact.
    pub(crate) fn path(&self) -> Option<Vec<Point>> {
        if !self.found {
            return None;
        }
        let mut path = vec![self.point(self.end)];
        let mut ci = self.end;
        while ci != self.start {
            ci = self.parent[ci];
            if ci == NO_PARENT || path.len() > self.bounds.len() {
                return None;
            }
            path.push(self.point(ci));
        }
        path.reverse();
        Some(path)
    }
}
