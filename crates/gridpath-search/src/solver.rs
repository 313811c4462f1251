//! The [`Solver`] owns a board and drives one search at a time.
//!
//! The solver never schedules anything itself. A caller starts a run with
//! [`Solver::run`] and then calls [`Solver::step`] at whatever pace it likes
//! (a timer using [`Solver::interval`], an animation frame, or a tight loop
//! via [`Solver::run_to_completion`]). Each step reports [`Progress`].
//!
//! ```text
//! Idle ──run──▶ Searching ──found──▶ Backtracking ──▶ Complete(Found)
//!                   │
//!                   └──frontier empty──▶ Complete(NoPathFound)
//! ```

use std::time::{Duration, Instant};

use gridpath_core::{CellValue, Maze, Point, Snapshot, Tool};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::{Algorithm, RunParams};
use crate::error::SearchError;
use crate::search::Search;
use crate::weights::scatter_weights;

/// Where the solver is in its run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Backtracking,
    Complete,
}

/// Terminal outcome of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Found,
    NoPathFound,
}

/// What a finished run reports.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub algorithm: Algorithm,
    pub status: Status,
    /// Cells discovered, the start included.
    pub nodes_searched: usize,
    /// Cells taken off the frontier and expanded.
    pub nodes_expanded: usize,
    /// Number of moves from start to end, `None` without a path.
    pub path_length: Option<usize>,
    /// Wall-clock time from `run` to completion.
    pub elapsed: Duration,
}

/// Result of a single [`Solver::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    Searching { nodes_searched: usize },
    Backtracking { path_length: usize },
    Complete(Summary),
}

/// Owns a [`Maze`] and runs searches over it.
pub struct Solver {
    maze: Maze,
    snapshot: Option<Snapshot>,
    search: Option<Search>,
    params: RunParams,
    phase: Phase,
    started: Option<Instant>,
    summary: Option<Summary>,
    path: Vec<Point>,
    rng: StdRng,
}

impl Solver {
    /// Wrap a board. Random weights draw from a freshly seeded generator.
    pub fn new(maze: Maze) -> Self {
        Self::with_seed(maze, rand::rng().random())
    }

    /// Wrap a board with a fixed seed for random weights.
    pub fn with_seed(maze: Maze, seed: u64) -> Self {
        Self {
            maze,
            snapshot: None,
            search: None,
            params: RunParams::default(),
            phase: Phase::Idle,
            started: None,
            summary: None,
            path: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Read-only view of the board for rendering.
    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Number of cells currently carrying `value`.
    pub fn count(&self, value: CellValue) -> usize {
        self.maze.count(value)
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a run is searching or backtracking. Painting is ignored while
    /// this is true.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Searching | Phase::Backtracking)
    }

    /// Parameters of the current or last run.
    #[inline]
    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Summary of the last completed run.
    #[inline]
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Start-to-end cells of the last successful run, empty otherwise.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// The board as painted before the current run's search markings.
    #[inline]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// How long the caller should wait between steps in the current phase.
    pub fn interval(&self) -> Option<Duration> {
        match self.phase {
            Phase::Searching => Some(self.params.search_interval()),
            Phase::Backtracking => Some(self.params.backtrace_interval()),
            Phase::Idle | Phase::Complete => None,
        }
    }

    /// Apply a paint request. Returns whether the board changed.
    ///
    /// Ignored while a run is active. Otherwise a pending snapshot is
    /// restored first, so edits land on the hand-painted board rather than
    /// on the last run's markings.
    pub fn paint(&mut self, p: Point, tool: Tool) -> bool {
        if self.is_running() {
            trace!("ignoring {tool:?} at {p}: search running");
            return false;
        }
        self.discard_markings();
        self.maze.paint(p, tool)
    }

    /// Stop any run and remove its markings, keeping the painted board.
    pub fn clear_path(&mut self) {
        self.stop();
        self.discard_markings();
        self.maze.clear_path();
    }

    /// Stop any run and wipe walls and weights, keeping the endpoints.
    pub fn clear_board(&mut self) {
        self.stop();
        self.snapshot = None;
        self.phase = Phase::Idle;
        self.maze.clear_walls();
    }

    /// Start a run, cancelling any active one.
    ///
    /// Fails without touching the board if the parameters are invalid or the
    /// start or end is missing.
    pub fn run(&mut self, params: RunParams) -> Result<(), SearchError> {
        params.validate()?;
        let (start, end) = match (self.maze.start(), self.maze.end()) {
            (Some(s), Some(e)) => (s, e),
            (s, e) => {
                return Err(SearchError::MissingEndpoints {
                    start: s.is_none(),
                    end: e.is_none(),
                });
            }
        };

        self.stop();
        self.maze.clear_path();
        let snap = self.snapshot.get_or_insert_with(|| self.maze.snapshot());
        self.maze.restore(snap);

        if params.random_weights && params.algorithm.is_weighted() {
            let n = scatter_weights(&mut self.maze, &mut self.rng);
            debug!("scattered {n} weighted cells");
        }

        let Some(search) = Search::new(&self.maze, &params, start, end) else {
            return Err(SearchError::MissingEndpoints {
                start: !self.maze.contains(start),
                end: !self.maze.contains(end),
            });
        };
        debug!(
            "starting {} from {start} to {end} on a {}x{} board",
            params.algorithm,
            self.maze.width(),
            self.maze.height()
        );
        self.search = Some(search);
        self.params = params;
        self.phase = Phase::Searching;
        self.started = Some(Instant::now());
        self.summary = None;
        self.path.clear();
        Ok(())
    }

    /// Advance the active run by one step.
    pub fn step(&mut self) -> Result<Progress, SearchError> {
        let Some(search) = self.search.as_mut() else {
            return Err(SearchError::NotRunning);
        };
        match self.phase {
            Phase::Searching => {
                search.expand(&mut self.maze);
                let nodes_searched = search.nodes_searched;
                if search.found {
                    debug!("end reached after {nodes_searched} nodes, backtracking");
                    self.phase = Phase::Backtracking;
                } else if search.exhausted() {
                    return Ok(Progress::Complete(self.finish(Status::NoPathFound)));
                }
                Ok(Progress::Searching { nodes_searched })
            }
            Phase::Backtracking => match search.backtrace_step(&mut self.maze) {
                Ok(true) => {
                    self.path = search.path().unwrap_or_default();
                    Ok(Progress::Complete(self.finish(Status::Found)))
                }
                Ok(false) => Ok(Progress::Backtracking {
                    path_length: search.path_length,
                }),
                Err(e) => {
                    warn!("{e}");
                    self.stop();
                    Err(e)
                }
            },
            Phase::Idle | Phase::Complete => Err(SearchError::NotRunning),
        }
    }

    /// Step until the run completes and return its summary.
    pub fn run_to_completion(&mut self) -> Result<Summary, SearchError> {
        loop {
            if let Progress::Complete(summary) = self.step()? {
                return Ok(summary);
            }
        }
    }

    /// Cancel the active run. The board keeps whatever the last completed
    /// step produced.
    pub fn stop(&mut self) {
        if self.search.take().is_some() && self.is_running() {
            debug!("stopping {} run", self.params.algorithm);
            self.phase = Phase::Idle;
        }
    }

    fn finish(&mut self, status: Status) -> Summary {
        let search = self.search.take();
        let (nodes_searched, nodes_expanded, path_length) = search
            .as_ref()
            .map(|s| (s.nodes_searched, s.nodes_expanded, s.path_length))
            .unwrap_or_default();
        let summary = Summary {
            algorithm: self.params.algorithm,
            status,
            nodes_searched,
            nodes_expanded,
            path_length: (status == Status::Found).then_some(path_length),
            elapsed: self.started.take().map(|t| t.elapsed()).unwrap_or_default(),
        };
        info!(
            "{} finished: {:?}, {} nodes searched, path length {:?}, {:.3}s",
            summary.algorithm,
            summary.status,
            summary.nodes_searched,
            summary.path_length,
            summary.elapsed.as_secs_f64()
        );
        self.phase = Phase::Complete;
        self.summary = Some(summary.clone());
        summary
    }

    /// Put the painted board back and forget the snapshot.
    fn discard_markings(&mut self) {
        if let Some(snap) = self.snapshot.take() {
            self.maze.restore(&snap);
        }
        if self.phase == Phase::Complete {
            self.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Heuristic;
    use crate::search::NO_PARENT;

    fn solver(layout: &str) -> Solver {
        Solver::with_seed(Maze::from_layout(layout).unwrap(), 42)
    }

    fn open_5x5() -> Solver {
        solver(
            "
S....
.....
.....
.....
....E",
        )
    }

    fn markings(s: &Solver) -> usize {
        s.count(CellValue::Frontier) + s.count(CellValue::Visited) + s.count(CellValue::Path)
    }

    #[test]
    fn bfs_on_open_board() {
        let mut s = open_5x5();
        s.run(RunParams::new(Algorithm::Bfs)).unwrap();
        let summary = s.run_to_completion().unwrap();
        assert_eq!(summary.status, Status::Found);
        assert_eq!(summary.nodes_searched, 25);
        assert_eq!(summary.path_length, Some(8));
        assert_eq!(s.path().len(), 9);
        assert_eq!(s.count(CellValue::Path), 7);
        assert_eq!(s.phase(), Phase::Complete);
        assert!(!s.is_running());
    }

    #[test]
    fn wall_with_gap_forces_detour() {
        let mut s = solver(
            "
S....
.....
.####
.....
....E",
        );
        s.run(RunParams::new(Algorithm::Bfs)).unwrap();
        let summary = s.run_to_completion().unwrap();
        assert_eq!(summary.path_length, Some(8));
        assert_eq!(summary.nodes_searched, 21);
        assert!(s.path().contains(&Point::new(0, 2)));
    }

    #[test]
    fn all_algorithms_agree_on_uniform_board() {
        let layout = "
S.....#...
..###.#.#.
..#...#.#.
..#.###.#.
........#E";
        let mut lengths = Vec::new();
        for params in [
            RunParams::new(Algorithm::Bfs),
            RunParams::new(Algorithm::Dijkstra),
            RunParams::new(Algorithm::Astar).with_heuristic(Heuristic::Manhattan),
            RunParams::new(Algorithm::Astar).with_heuristic(Heuristic::Euclidean),
        ] {
            let mut s = solver(layout);
            s.run(params).unwrap();
            let summary = s.run_to_completion().unwrap();
            assert_eq!(summary.status, Status::Found);
            lengths.push(summary.path_length.unwrap());
        }
        assert_eq!(lengths, vec![21; 4]);
    }

    #[test]
    fn astar_expands_no_more_than_bfs() {
        let layout = "
..........
..........
.S......E.
..........
..........";
        let mut bfs = solver(layout);
        bfs.run(RunParams::new(Algorithm::Bfs)).unwrap();
        let b = bfs.run_to_completion().unwrap();
        for h in [Heuristic::Manhattan, Heuristic::Euclidean] {
            let mut astar = solver(layout);
            astar
                .run(RunParams::new(Algorithm::Astar).with_heuristic(h))
                .unwrap();
            let a = astar.run_to_completion().unwrap();
            assert_eq!(a.path_length, b.path_length);
            assert!(a.nodes_expanded <= b.nodes_expanded);
            assert!(a.nodes_searched <= b.nodes_searched);
        }
    }

    #[test]
    fn enclosed_start_reports_no_path() {
        let layout = "
...#....
.S.#....
...#...E
####....";
        for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::Astar] {
            let mut s = solver(layout);
            s.run(RunParams::new(algorithm)).unwrap();
            let summary = s.run_to_completion().unwrap();
            assert_eq!(summary.status, Status::NoPathFound);
            assert_eq!(summary.path_length, None);
            assert_eq!(summary.nodes_searched, 9);
            assert!(s.path().is_empty());
            assert_eq!(s.step(), Err(SearchError::NotRunning));
        }
    }

    #[test]
    fn weighted_searches_agree_on_cost() {
        let layout = "
S..w....
.w.w.ww.
.w...w..
.wwwww.w
......wE";
        let cost = |s: &Solver| -> u32 {
            s.path()[1..]
                .iter()
                .map(|&p| match s.snapshot().and_then(|snap| snap.at(p)) {
                    Some(CellValue::Weighted) => 6,
                    _ => 1,
                })
                .sum()
        };
        let mut d = solver(layout);
        d.run(RunParams::new(Algorithm::Dijkstra).with_weight(6)).unwrap();
        d.run_to_completion().unwrap();
        let mut a = solver(layout);
        a.run(
            RunParams::new(Algorithm::Astar)
                .with_heuristic(Heuristic::Manhattan)
                .with_weight(6),
        )
        .unwrap();
        a.run_to_completion().unwrap();
        assert_eq!(cost(&d), cost(&a));
    }

    #[test]
    fn progress_is_reported_per_phase() {
        let mut s = solver("S...E");
        s.run(RunParams::new(Algorithm::Bfs).with_steps_per_second(4.0))
            .unwrap();
        assert_eq!(s.interval(), Some(Duration::from_millis(250)));

        let mut searched = Vec::new();
        let mut lengths = Vec::new();
        let summary = loop {
            match s.step().unwrap() {
                Progress::Searching { nodes_searched } => searched.push(nodes_searched),
                Progress::Backtracking { path_length } => {
                    assert_eq!(s.interval(), Some(Duration::from_millis(500)));
                    lengths.push(path_length);
                }
                Progress::Complete(summary) => break summary,
            }
        };
        assert_eq!(searched, vec![2, 3, 4, 5]);
        assert_eq!(lengths, vec![1, 2, 3]);
        assert_eq!(summary.path_length, Some(4));
        assert_eq!(s.summary(), Some(&summary));
        assert_eq!(s.interval(), None);
        assert_eq!(s.maze().to_layout(), "S***E");
    }

    #[test]
    fn broken_backtrace_stops_the_run() {
        let mut s = solver("S...E");
        s.run(RunParams::new(Algorithm::Bfs)).unwrap();
        while s.phase() == Phase::Searching {
            s.step().unwrap();
        }
        assert_eq!(s.phase(), Phase::Backtracking);

        let search = s.search.as_mut().unwrap();
        let hole = search.bounds.index(Point::new(2, 0)).unwrap();
        search.parent[hole] = NO_PARENT;

        let err = loop {
            match s.step() {
                Ok(Progress::Backtracking { .. }) => {}
                Ok(other) => panic!("unexpected progress {other:?}"),
                Err(e) => break e,
            }
        };
        assert_eq!(
            err,
            SearchError::BacktraceBroken {
                at: Point::new(2, 0)
            }
        );
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.is_running());
        assert!(s.summary().is_none());
        assert!(s.path().is_empty());
        assert_eq!(s.interval(), None);
        assert_eq!(s.step(), Err(SearchError::NotRunning));
    }

    #[test]
    fn missing_endpoints_leave_board_alone() {
        let mut s = solver("S.#..");
        let before = s.maze().clone();
        assert_eq!(
            s.run(RunParams::default()),
            Err(SearchError::MissingEndpoints {
                start: false,
                end: true
            })
        );
        assert_eq!(s.maze(), &before);
        assert!(s.snapshot().is_none());
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.step(), Err(SearchError::NotRunning));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut s = open_5x5();
        let err = s.run(RunParams::default().with_weight(0)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidParams(_)));
        assert!(!s.is_running());
    }

    #[test]
    fn rerun_starts_from_painted_board() {
        let mut s = solver(
            "
S..w.
.#...
.#.#.
...#E",
        );
        let painted = s.maze().clone();
        s.run(RunParams::new(Algorithm::Bfs)).unwrap();
        s.run_to_completion().unwrap();
        assert!(markings(&s) > 0);

        s.run(RunParams::new(Algorithm::Astar)).unwrap();
        assert_eq!(s.maze(), &painted);
        assert_eq!(markings(&s), 0);
        s.run_to_completion().unwrap();

        s.run(RunParams::new(Algorithm::Astar)).unwrap();
        assert_eq!(s.maze(), &painted);
    }

    #[test]
    fn random_weights_do_not_persist() {
        let mut s = open_5x5();
        s.run(
            RunParams::new(Algorithm::Dijkstra)
                .with_random_weights(true)
                .with_weight(3),
        )
        .unwrap();
        let scattered = s.count(CellValue::Weighted);
        assert!(scattered > 0);
        s.run_to_completion().unwrap();

        s.run(RunParams::new(Algorithm::Bfs).with_random_weights(true))
            .unwrap();
        assert_eq!(s.count(CellValue::Weighted), 0);
        assert_eq!(s.run_to_completion().unwrap().path_length, Some(8));
    }

    #[test]
    fn painting_is_ignored_while_running() {
        let mut s = open_5x5();
        s.run(RunParams::default()).unwrap();
        s.step().unwrap();
        assert!(!s.paint(Point::new(2, 2), Tool::Wall));
        assert_eq!(s.maze().at(Point::new(2, 2)), Some(CellValue::Empty));
    }

    #[test]
    fn painting_after_a_run_restores_the_board() {
        let mut s = open_5x5();
        s.run(RunParams::default()).unwrap();
        s.run_to_completion().unwrap();
        assert!(s.paint(Point::new(2, 2), Tool::Wall));
        assert_eq!(markings(&s), 0);
        assert!(s.snapshot().is_none());
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.count(CellValue::Wall), 1);

        // The next run snapshots the edited board.
        s.run(RunParams::default()).unwrap();
        assert_eq!(
            s.snapshot().and_then(|snap| snap.at(Point::new(2, 2))),
            Some(CellValue::Wall)
        );
    }

    #[test]
    fn stop_cancels_and_keeps_markings() {
        let mut s = open_5x5();
        s.run(RunParams::default()).unwrap();
        for _ in 0..3 {
            s.step().unwrap();
        }
        let marked = markings(&s);
        s.stop();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(markings(&s), marked);
        assert_eq!(s.step(), Err(SearchError::NotRunning));
        assert!(s.summary().is_none());
    }

    #[test]
    fn starting_a_run_cancels_the_previous_one() {
        let mut s = open_5x5();
        s.run(RunParams::new(Algorithm::Bfs)).unwrap();
        for _ in 0..5 {
            s.step().unwrap();
        }
        s.run(RunParams::new(Algorithm::Astar)).unwrap();
        assert_eq!(markings(&s), 0);
        let summary = s.run_to_completion().unwrap();
        assert_eq!(summary.algorithm, Algorithm::Astar);
        assert_eq!(summary.path_length, Some(8));
    }

    #[test]
    fn clear_board_keeps_endpoints_only() {
        let mut s = solver("S#w\n.#E");
        s.run(RunParams::default()).unwrap();
        s.run_to_completion().unwrap();
        s.clear_board();
        assert!(s.snapshot().is_none());
        assert_eq!(s.maze().to_layout(), "S..\n..E");
    }

    #[test]
    fn clear_path_keeps_painted_cells() {
        let mut s = solver("S#w\n..E");
        s.run(RunParams::default()).unwrap();
        s.run_to_completion().unwrap();
        s.clear_path();
        assert_eq!(s.maze().to_layout(), "S#w\n..E");
        assert_eq!(s.phase(), Phase::Idle);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn summary_round_trip() {
        let summary = Summary {
            algorithm: Algorithm::Astar,
            status: Status::Found,
            nodes_searched: 30,
            nodes_expanded: 12,
            path_length: Some(9),
            elapsed: Duration::from_millis(1500),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
