use gridpath_core::{CellValue, Maze};

use crate::search::{Frontier, Search, UNREACHABLE};

impl Search {
    pub(crate) fn seed_astar(&mut self) {
        self.cost[self.start] = 0;
        let h = self
            .heuristic
            .estimate(self.point(self.start), self.point(self.end));
        if let Frontier::Priority(q) = &mut self.frontier {
            q.insert(self.start, h);
        }
    }

    /// Expand the queued cell with the smallest `f = g + h`.
    ///
    /// Cells settle when popped; stale queue entries for settled cells are
    /// skipped. A neighbour is re-queued whenever a cheaper `g` is found.
    pub(crate) fn astar_step(&mut self, maze: &mut Maze) {
        let Frontier::Priority(queue) = &mut self.frontier else {
            return;
        };
        let ci = loop {
            let Some((ci, _)) = queue.extract_min() else {
                return;
            };
            if !self.settled[ci] {
                break ci;
            }
        };
        self.settled[ci] = true;
        self.nodes_expanded += 1;
        let cp = self.point(ci);
        maze.mark(cp, CellValue::Visited);
        let current_g = self.cost[ci];
        let goal = self.point(self.end);

        self.collect_neighbors(maze, cp);
        let nbuf = std::mem::take(&mut self.nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            if self.settled[ni] {
                continue;
            }
            let tentative_g = current_g + self.weights.get(ni);
            if tentative_g >= self.cost[ni] {
                continue;
            }
            // Count each cell once, however often it is improved.
            if self.cost[ni] == UNREACHABLE {
                self.nodes_searched += 1;
            }
            self.cost[ni] = tentative_g;
            self.discover(maze, ni, ci);
            if ni != self.end {
                let f = tentative_g as f64 + self.heuristic.estimate(np, goal);
                if let Frontier::Priority(queue) = &mut self.frontier {
                    queue.insert(ni, f);
                }
            }
        }
        self.nbuf = nbuf;
    }
}
