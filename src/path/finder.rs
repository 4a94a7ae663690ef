//! Policy-driven path search.
//!
//! Depth-first search from a source location toward a destination, stepping
//! only into regions the policy accepts. The search keeps just the current
//! partial path, so a successful result is the route itself with no dead-end
//! siblings in it.
//!
//! The destination region is only ever entered through the goal test, so it
//! appears once, as the last step.
//!
//! Regions are marked visited for the whole search. Acceptance depends only
//! on the region, never on the path leading to it, so a region that led
//! nowhere once cannot lead anywhere via another coast: the search is plain
//! reachability and runs in O(V + E).

use crate::board::adjacency::AdjacencyGraph;
use crate::board::region::Location;
use crate::resolve::policy::RoutePolicy;
use crate::resolve::status::EvalError;

/// Reusable path finder over one graph.
pub struct PathFinder<'a> {
    graph: &'a AdjacencyGraph,
}

impl<'a> PathFinder<'a> {
    pub fn new(graph: &'a AdjacencyGraph) -> Self {
        PathFinder { graph }
    }

    /// Searches for a path from `src` to `dest` through accepted regions.
    ///
    /// Returns the path (first = `src`, last = `dest`), or `None` when the
    /// destination cannot be reached. Errors only when the policy does.
    pub fn find_path<P: RoutePolicy + ?Sized>(
        &self,
        src: Location,
        dest: Location,
        policy: &P,
    ) -> Result<Option<Vec<Location>>, EvalError> {
        let mut visited = vec![false; self.graph.region_count()];
        let mut path = Vec::with_capacity(8);
        if self.search(src, dest, policy, &mut visited, &mut path)? {
            tracing::trace!(len = path.len(), "path found");
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    /// Returns true if `find_path` would succeed.
    pub fn has_path<P: RoutePolicy + ?Sized>(
        &self,
        src: Location,
        dest: Location,
        policy: &P,
    ) -> Result<bool, EvalError> {
        Ok(self.find_path(src, dest, policy)?.is_some())
    }

    // Recursion depth is bounded by the region count.
    fn search<P: RoutePolicy + ?Sized>(
        &self,
        current: Location,
        dest: Location,
        policy: &P,
        visited: &mut [bool],
        path: &mut Vec<Location>,
    ) -> Result<bool, EvalError> {
        visited[current.region.index()] = true;
        path.push(current);

        if policy.is_adjacent_to_dest(current, dest) {
            path.push(dest);
            return Ok(true);
        }

        for coast in self.graph.direct_coasts(current.region) {
            for &candidate in self.graph.get_adjacent(current.region, coast) {
                if visited[candidate.region.index()] || candidate.region == dest.region {
                    continue;
                }
                if !policy.accepts(candidate.region)? {
                    continue;
                }
                if self.search(candidate, dest, policy, visited, path)? {
                    return Ok(true);
                }
            }
        }

        path.pop();
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::adjacency::MapBuilder;
    use crate::board::region::{CoastKind, Region};
    use std::cell::Cell;

    /// Accepts a fixed set of regions and counts acceptance queries.
    struct Allow {
        graph_src: Region,
        allowed: Vec<Region>,
        goal_neighbors: Vec<Region>,
        queries: Cell<usize>,
    }

    impl RoutePolicy for Allow {
        fn accepts(&self, candidate: Region) -> Result<bool, EvalError> {
            self.queries.set(self.queries.get() + 1);
            Ok(self.allowed.contains(&candidate))
        }

        fn is_adjacent_to_dest(&self, current: Location, _dest: Location) -> bool {
            current.region != self.graph_src && self.goal_neighbors.contains(&current.region)
        }
    }

    struct Failing;

    impl RoutePolicy for Failing {
        fn accepts(&self, candidate: Region) -> Result<bool, EvalError> {
            Err(EvalError::MissingOrderState(candidate))
        }

        fn is_adjacent_to_dest(&self, _current: Location, _dest: Location) -> bool {
            false
        }
    }

    /// A line of seas s1..s4 from coastal A; s2 has a dead-end branch d.
    fn line() -> (AdjacencyGraph, Vec<Region>) {
        let mut b = MapBuilder::new("line");
        let names = ["A", "S1", "D", "S2", "S3", "S4", "B", "L"];
        let r: Vec<Region> = names.iter().map(|n| b.add_region(n, &[]).unwrap()).collect();
        let single = |x: Region| Location::new(x, CoastKind::Single);
        let land = |x: Region| Location::new(x, CoastKind::Land);
        b.connect(single(r[0]), single(r[1])).unwrap();
        b.connect(single(r[1]), single(r[2])).unwrap();
        b.connect(single(r[1]), single(r[3])).unwrap();
        b.connect(single(r[3]), single(r[4])).unwrap();
        b.connect(single(r[4]), single(r[5])).unwrap();
        b.connect(single(r[5]), single(r[6])).unwrap();
        b.connect(land(r[0]), land(r[7])).unwrap();
        b.connect(land(r[6]), land(r[7])).unwrap();
        (b.build().unwrap(), r)
    }

    #[test]
    fn returns_minimal_path_without_dead_ends() {
        let (g, r) = line();
        let policy = Allow {
            graph_src: r[0],
            allowed: vec![r[1], r[2], r[3], r[4], r[5]],
            goal_neighbors: vec![r[5]],
            queries: Cell::new(0),
        };
        let src = Location::new(r[0], CoastKind::Land);
        let dest = Location::new(r[6], CoastKind::Land);
        let path = PathFinder::new(&g).find_path(src, dest, &policy).unwrap().unwrap();
        let regions: Vec<Region> = path.iter().map(|l| l.region).collect();
        assert_eq!(regions, vec![r[0], r[1], r[3], r[4], r[5], r[6]]);
        assert_eq!(path[0], src);
        assert_eq!(path[path.len() - 1], dest);
    }

    #[test]
    fn blocked_region_means_no_path() {
        let (g, r) = line();
        let policy = Allow {
            graph_src: r[0],
            allowed: vec![r[1], r[2], r[3], r[5]],
            goal_neighbors: vec![r[5]],
            queries: Cell::new(0),
        };
        let src = Location::new(r[0], CoastKind::Land);
        let dest = Location::new(r[6], CoastKind::Land);
        let finder = PathFinder::new(&g);
        assert_eq!(finder.find_path(src, dest, &policy).unwrap(), None);
        assert!(!finder.has_path(src, dest, &policy).unwrap());
    }

    #[test]
    fn goal_test_runs_before_expansion() {
        let (g, r) = line();
        let policy = Allow {
            graph_src: r[0],
            allowed: vec![r[1]],
            goal_neighbors: vec![r[1]],
            queries: Cell::new(0),
        };
        let src = Location::new(r[0], CoastKind::Land);
        let dest = Location::new(r[6], CoastKind::Land);
        let path = PathFinder::new(&g).find_path(src, dest, &policy).unwrap().unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn each_region_expanded_once() {
        let (g, r) = line();
        let policy = Allow {
            graph_src: r[0],
            allowed: r.clone(),
            goal_neighbors: Vec::new(),
            queries: Cell::new(0),
        };
        let src = Location::new(r[0], CoastKind::Land);
        let dest = Location::new(r[6], CoastKind::Land);
        assert_eq!(PathFinder::new(&g).find_path(src, dest, &policy).unwrap(), None);
        // One acceptance query per region first reached, never more than the edge count.
        assert!(policy.queries.get() <= 2 * 8);
    }

    #[test]
    fn destination_is_never_an_interior_step() {
        let (g, r) = line();
        let policy = Allow {
            graph_src: r[0],
            allowed: r.clone(),
            goal_neighbors: vec![r[5]],
            queries: Cell::new(0),
        };
        let src = Location::new(r[0], CoastKind::Land);
        let dest = Location::new(r[6], CoastKind::Land);
        let path = PathFinder::new(&g).find_path(src, dest, &policy).unwrap().unwrap();
        let regions: Vec<Region> = path.iter().map(|l| l.region).collect();
        assert_eq!(regions, vec![r[0], r[1], r[3], r[4], r[5], r[6]]);
    }

    #[test]
    fn policy_errors_propagate() {
        let (g, r) = line();
        let src = Location::new(r[0], CoastKind::Land);
        let dest = Location::new(r[6], CoastKind::Land);
        let err = PathFinder::new(&g).find_path(src, dest, &Failing).unwrap_err();
        assert!(matches!(err, EvalError::MissingOrderState(_)));
    }
}
