//! Unweighted shortest distances over touching adjacency.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::board::adjacency::AdjacencyGraph;
use crate::board::region::Region;

/// Returns the number of steps between two regions, counting any touching
/// border as one step regardless of unit type.
///
/// `Some(0)` when `src == dest`, `None` when they are not connected.
pub fn min_distance(graph: &AdjacencyGraph, src: Region, dest: Region) -> Option<usize> {
    if src == dest {
        return Some(0);
    }
    let mut dist: Vec<Option<usize>> = vec![None; graph.region_count()];
    let mut queue = VecDeque::new();
    dist[src.index()] = Some(0);
    queue.push_back(src);

    while let Some(current) = queue.pop_front() {
        let next_dist = dist[current.index()].map_or(0, |d| d + 1);
        for next in graph.get_all_adjacent(current) {
            let idx = next.region.index();
            if dist[idx].is_some() {
                continue;
            }
            if next.region == dest {
                return Some(next_dist);
            }
            dist[idx] = Some(next_dist);
            queue.push_back(next.region);
        }
    }
    None
}

/// Distances from `src` to every region.
fn distances_from(graph: &AdjacencyGraph, src: Region) -> Vec<Option<usize>> {
    let mut dist = vec![None; graph.region_count()];
    let mut queue = VecDeque::new();
    dist[src.index()] = Some(0);
    queue.push_back(src);

    while let Some(current) = queue.pop_front() {
        let next_dist = dist[current.index()].map_or(0, |d| d + 1);
        for next in graph.get_all_adjacent(current) {
            let idx = next.region.index();
            if dist[idx].is_none() {
                dist[idx] = Some(next_dist);
                queue.push_back(next.region);
            }
        }
    }
    dist
}

/// Precomputed all-pairs `min_distance` for one map.
///
/// Rows are filled in parallel, one breadth-first search per region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    rows: Vec<Vec<Option<usize>>>,
}

impl DistanceTable {
    pub fn new(graph: &AdjacencyGraph) -> Self {
        let sources: Vec<Region> = graph.regions().collect();
        let rows = sources
            .par_iter()
            .map(|&src| distances_from(graph, src))
            .collect();
        tracing::debug!(map = graph.name(), regions = sources.len(), "distance table built");
        DistanceTable { rows }
    }

    /// Same result as `min_distance(graph, src, dest)`.
    #[inline]
    pub fn get(&self, src: Region, dest: Region) -> Option<usize> {
        self.rows[src.index()][dest.index()]
    }

    /// Largest finite distance in the table.
    pub fn diameter(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter().flatten())
            .copied()
            .max()
            .unwrap_or(0)
    }
}
