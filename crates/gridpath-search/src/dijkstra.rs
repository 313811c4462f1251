use gridpath_core::{CellValue, Maze};

use crate::distance::euclidean;
use crate::search::{Frontier, Search};

impl Search {
    pub(crate) fn seed_dijkstra(&mut self) {
        self.settled[self.start] = true;
        // The seed priority is never compared against anything: the start is
        // the only entry when it is popped.
        let priority = euclidean(self.point(self.start), self.point(self.end));
        if let Frontier::Priority(q) = &mut self.frontier {
            q.insert(self.start, priority);
        }
    }

    /// Expand the cheapest queued cell.
    ///
    /// A neighbour is settled the first time it is discovered and its
    /// running cost becomes its own weight plus the running cost of the cell
    /// that discovered it. Cells are never relaxed again afterwards: costs
    /// live on cells rather than edges and pops come out in non-decreasing
    /// cost, so the first discoverer is already the cheapest predecessor.
    pub(crate) fn dijkstra_step(&mut self, maze: &mut Maze) {
        let Frontier::Priority(queue) = &mut self.frontier else {
            return;
        };
        let Some((ci, _)) = queue.extract_min() else {
            return;
        };
        self.nodes_expanded += 1;
        let cp = self.point(ci);
        maze.mark(cp, CellValue::Visited);
        let base = self.weights.get(ci);

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
            let acc = self.weights.get_mut(ni);
            *acc += base;
            let priority = *acc as f64;
            self.discover(maze, ni, ci);
            if ni != self.end {
                if let Frontier::Priority(queue) = &mut self.frontier {
                    queue.insert(ni, priority);
                }
            }
        }
        self.nbuf = nbuf;
    }
}
