use gridpath_core::{CellValue, Maze};

use crate::search::{Frontier, Search};

impl Search {
    pub(crate) fn seed_bfs(&mut self) {
        self.settled[self.start] = true;
        if let Frontier::Fifo(q) = &mut self.frontier {
            q.push_back(self.start);
        }
    }

    /// Expand the oldest queued cell.
    ///
    /// Cells are settled the moment they are discovered and never queued
    /// twice, so layers come off the queue in non-decreasing hop distance.
    pub(crate) fn bfs_step(&mut self, maze: &mut Maze) {
        let Frontier::Fifo(queue) = &mut self.frontier else {
            return;
        };
        let Some(ci) = queue.pop_front() else {
            return;
        };
        self.nodes_expanded += 1;
        let cp = self.point(ci);
        maze.mark(cp, CellValue::Visited);

        self.collect_neighbors(maze, cp);
        let nbuf = std::mem::take(&mut self.nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            if self.settled[ni] {
                continue;
            }
            self.settled[ni] = true;
            self.nodes_searched += 1;
            self.discover(maze, ni, ci);
            if ni != self.end {
                if let Frontier::Fifo(queue) = &mut self.frontier {
                    queue.push_back(ni);
                }
            }
        }
        self.nbuf = nbuf;
    }
}
