//! Enumeration of every simple sea route between two land regions.
//!
//! The search grows a breadth-first tree rooted at the source. A node is
//! expanded into each touching sea or convoyable-coast region the policy
//! accepts, unless that region already appears among the node's ancestors.
//! Sibling branches may therefore share regions, which is what lets the
//! caller compare alternative routes through the same waters. Whenever a
//! node touches the destination a terminal leaf is added, whatever the
//! destination's terrain and even directly under the root; every
//! root-to-leaf branch ending there is one route.
//!
//! Nodes live in an arena and refer to each other by index.

use std::collections::VecDeque;

use serde::Serialize;

use crate::board::adjacency::AdjacencyGraph;
use crate::board::order::Route;
use crate::board::region::Region;
use crate::resolve::policy::RoutePolicy;
use crate::resolve::status::EvalError;

/// One node of a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub region: Region,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Arena of `TreeNode`s. Index 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTree {
    nodes: Vec<TreeNode>,
}

impl RouteTree {
    /// Index of the root node.
    pub const ROOT: usize = 0;

    /// Creates a tree holding only `root`.
    pub fn new(root: Region) -> Self {
        RouteTree {
            nodes: vec![TreeNode {
                region: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Grows the full route tree from `src` toward `dest`.
    ///
    /// Returns a bare root when `src` and `dest` cannot be linked by sea at
    /// all (same region, a non-land endpoint, or a destination with no sea or
    /// convoyable-coast neighbor).
    pub fn build<P: RoutePolicy + ?Sized>(
        graph: &AdjacencyGraph,
        policy: &P,
        src: Region,
        dest: Region,
    ) -> Result<RouteTree, EvalError> {
        let mut tree = RouteTree::new(src);
        if !can_link_by_sea(graph, src, dest) {
            return Ok(tree);
        }

        // Acceptance is a property of the region, so ask once per region.
        let mut accepted: Vec<Option<bool>> = vec![None; graph.region_count()];
        let mut queue = VecDeque::from([RouteTree::ROOT]);

        while let Some(idx) = queue.pop_front() {
            let region = tree.nodes[idx].region;
            for next in graph.get_all_adjacent(region) {
                let next = next.region;
                if next == dest {
                    tree.push(idx, dest);
                    continue;
                }
                if !graph.is_sea_or_convoyable(next) || tree.has_ancestor(idx, next) {
                    continue;
                }
                let ok = match accepted[next.index()] {
                    Some(ok) => ok,
                    None => {
                        let ok = policy.accepts(next)?;
                        accepted[next.index()] = Some(ok);
                        ok
                    }
                };
                if ok {
                    let child = tree.push(idx, next);
                    queue.push_back(child);
                }
            }
        }

        Ok(tree)
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    fn push(&mut self, parent: usize, region: Region) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(TreeNode {
            region,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(idx);
        idx
    }

    /// Returns true if `region` is held by node `idx` or one of its ancestors.
    pub fn has_ancestor(&self, idx: usize, region: Region) -> bool {
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            let node = &self.nodes[i];
            if node.region == region {
                return true;
            }
            cursor = node.parent;
        }
        false
    }

    /// Regions from the root down to node `idx`.
    pub fn branch(&self, idx: usize) -> Vec<Region> {
        let mut regions = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            regions.push(self.nodes[i].region);
            cursor = self.nodes[i].parent;
        }
        regions.reverse();
        regions
    }

    /// All root-to-leaf branches whose leaf holds `dest`, in tree order.
    pub fn branches_to(&self, dest: Region) -> Vec<Route> {
        let mut routes = Vec::new();
        let mut stack = vec![RouteTree::ROOT];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.children.is_empty() {
                if idx != RouteTree::ROOT && node.region == dest {
                    routes.push(Route::new(self.branch(idx)));
                }
                continue;
            }
            stack.extend(node.children.iter().rev());
        }
        routes
    }
}

fn can_link_by_sea(graph: &AdjacencyGraph, src: Region, dest: Region) -> bool {
    src != dest
        && graph.is_land(src)
        && graph.is_land(dest)
        && graph
            .get_all_adjacent(dest)
            .iter()
            .any(|l| graph.is_sea_or_convoyable(l.region))
}

/// Finds every simple route from `src` to `dest` through regions `policy`
/// accepts. Each route starts at `src`, ends at `dest` and repeats no region.
pub fn find_all_sea_routes<P: RoutePolicy + ?Sized>(
    graph: &AdjacencyGraph,
    policy: &P,
    src: Region,
    dest: Region,
) -> Result<Vec<Route>, EvalError> {
    let tree = RouteTree::build(graph, policy, src, dest)?;
    let routes = tree.branches_to(dest);
    tracing::trace!(nodes = tree.nodes().len(), routes = routes.len(), "enumerated sea routes");
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::adjacency::MapBuilder;
    use crate::board::region::{CoastKind, Location};
    use crate::board::state::BoardState;
    use crate::board::unit::Unit;
    use crate::resolve::policy::Theoretical;
    use std::collections::BTreeSet;

    struct Harbor {
        graph: AdjacencyGraph,
        a: Region,
        b: Region,
        c: Region,
        s1: Region,
        s2: Region,
        s3: Region,
    }

    /// A and B share a land border and two sea lanes: A-S1-B and A-S2-S3-B,
    /// with S1 and S2 touching. C is inland behind B.
    fn harbor() -> Harbor {
        let mut builder = MapBuilder::new("harbor");
        let a = builder.add_region("A", &[]).unwrap();
        let b = builder.add_region("B", &[]).unwrap();
        let c = builder.add_region("C", &[]).unwrap();
        let s1 = builder.add_region("S1", &[]).unwrap();
        let s2 = builder.add_region("S2", &[]).unwrap();
        let s3 = builder.add_region("S3", &[]).unwrap();
        let land = |r| Location::new(r, CoastKind::Land);
        let single = |r| Location::new(r, CoastKind::Single);
        builder.connect(land(a), land(b)).unwrap();
        builder.connect(land(b), land(c)).unwrap();
        builder.connect(single(a), single(s1)).unwrap();
        builder.connect(single(s1), single(b)).unwrap();
        builder.connect(single(a), single(s2)).unwrap();
        builder.connect(single(s2), single(s3)).unwrap();
        builder.connect(single(s3), single(b)).unwrap();
        builder.connect(single(s1), single(s2)).unwrap();
        Harbor {
            graph: builder.build().unwrap(),
            a,
            b,
            c,
            s1,
            s2,
            s3,
        }
    }

    fn fleets(h: &Harbor, at: &[Region]) -> BoardState {
        let mut board = BoardState::for_graph(&h.graph);
        for &r in at {
            board.place_unit(r, Unit::fleet());
        }
        board
    }

    fn as_set(routes: &[Route]) -> BTreeSet<Vec<Region>> {
        routes.iter().map(|r| r.regions().to_vec()).collect()
    }

    #[test]
    fn enumerates_every_simple_route() {
        let h = harbor();
        let board = fleets(&h, &[h.s1, h.s2, h.s3]);
        let policy = Theoretical::new(&h.graph, &board, h.a);
        let routes = find_all_sea_routes(&h.graph, &policy, h.a, h.b).unwrap();

        let expected: BTreeSet<Vec<Region>> = [
            vec![h.a, h.b],
            vec![h.a, h.s1, h.b],
            vec![h.a, h.s1, h.s2, h.s3, h.b],
            vec![h.a, h.s2, h.s3, h.b],
            vec![h.a, h.s2, h.s1, h.b],
        ]
        .into_iter()
        .collect();
        assert_eq!(routes.len(), 5);
        assert_eq!(as_set(&routes), expected);
    }

    #[test]
    fn routes_never_repeat_a_region() {
        let h = harbor();
        let board = fleets(&h, &[h.s1, h.s2, h.s3]);
        let policy = Theoretical::new(&h.graph, &board, h.a);
        for route in find_all_sea_routes(&h.graph, &policy, h.a, h.b).unwrap() {
            let unique: BTreeSet<Region> = route.regions().iter().copied().collect();
            assert_eq!(unique.len(), route.len());
            assert_eq!(route.source(), Some(h.a));
            assert_eq!(route.destination(), Some(h.b));
        }
    }

    #[test]
    fn rejected_region_prunes_branches() {
        let h = harbor();
        let board = fleets(&h, &[h.s1, h.s3]);
        let policy = Theoretical::new(&h.graph, &board, h.a);
        let routes = find_all_sea_routes(&h.graph, &policy, h.a, h.b).unwrap();
        assert_eq!(
            as_set(&routes),
            [vec![h.a, h.b], vec![h.a, h.s1, h.b]].into_iter().collect()
        );
    }

    #[test]
    fn unreachable_endpoints_give_no_routes() {
        let h = harbor();
        let board = fleets(&h, &[h.s1, h.s2, h.s3]);
        let policy = Theoretical::new(&h.graph, &board, h.a);
        // Inland destination.
        assert!(find_all_sea_routes(&h.graph, &policy, h.a, h.c).unwrap().is_empty());
        // Sea destination.
        assert!(find_all_sea_routes(&h.graph, &policy, h.a, h.s3).unwrap().is_empty());
        // Same region.
        assert!(find_all_sea_routes(&h.graph, &policy, h.a, h.a).unwrap().is_empty());
    }

    #[test]
    fn land_neighbor_of_source_is_a_leaf() {
        let h = harbor();
        let board = fleets(&h, &[]);
        let policy = Theoretical::new(&h.graph, &board, h.a);
        let tree = RouteTree::build(&h.graph, &policy, h.a, h.b).unwrap();
        assert_eq!(tree.nodes().len(), 2);
        assert_eq!(tree.node(1).region, h.b);
        assert_eq!(tree.node(1).parent, Some(RouteTree::ROOT));
        assert_eq!(tree.branches_to(h.b), vec![Route::new(vec![h.a, h.b])]);
    }

    #[test]
    fn tree_serializes_as_index_arena() {
        let h = harbor();
        let board = fleets(&h, &[h.s1]);
        let policy = Theoretical::new(&h.graph, &board, h.a);
        let tree = RouteTree::build(&h.graph, &policy, h.a, h.b).unwrap();
        // Root A, leaf B beside it, S1, and the leaf B under S1.
        assert_eq!(tree.nodes().len(), 4);
        assert!(tree.has_ancestor(3, h.a));
        assert!(!tree.has_ancestor(2, h.b));

        let json = serde_json::to_value(&tree).unwrap();
        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 4);
        assert!(nodes[0]["parent"].is_null());
        assert_eq!(nodes[0]["children"], serde_json::json!([1, 2]));
        assert_eq!(nodes[3]["parent"], serde_json::json!(2));
    }
}
