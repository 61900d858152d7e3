
/*!
Bounded search of the overlap graph for every path connecting two oriented nodes within a
distance constraint. The search expands partial paths in order of accumulated distance and
keeps a visited-node counter; once the counter passes the configured ceiling the search is
abandoned and the caller treats the region as too complex to resolve.

The distance of a path is the sum of its edge distances plus the lengths of its interior
contigs, which estimates the number of bases between the end of the source and the start
of the destination.
*/

use log::trace;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;

use crate::contig_node::{ContigNode, ContigPath};
use crate::overlap_graph::OverlapGraph;

/// The outcome of one bounded search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    /// Every discovered path, including both endpoints
    pub solutions: Vec<ContigPath>,
    /// True if the cost ceiling was hit before the search space was exhausted
    pub aborted: bool,
    /// The number of nodes popped off the frontier
    pub cost: usize
}

/// A partial path on the search frontier.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct SearchNode {
    /// Path so far, starting at the source
    path: ContigPath,
    /// Accumulated distance from the end of the source to the end of the path
    distance: i64
}

/// Finds every path from `source` to `dest` whose distance is within `max_distance`.
/// # Arguments
/// * `graph` - the overlap graph to search
/// * `source` - the oriented start node
/// * `dest` - the oriented goal node
/// * `max_distance` - the inclusive distance ceiling for a path to count as a solution
/// * `max_overlap` - the largest junction overlap (k-1), used to prune unreachable branches
/// * `max_cost` - the visited-node ceiling; the search aborts once this many nodes were expanded
pub fn constrained_search(
    graph: &OverlapGraph,
    source: ContigNode,
    dest: ContigNode,
    max_distance: i64,
    max_overlap: i64,
    max_cost: usize
) -> SearchResult {
    let mut result = SearchResult::default();
    let mut frontier: PriorityQueue<SearchNode, Reverse<i64>> = PriorityQueue::new();
    frontier.push(SearchNode { path: vec![source], distance: 0 }, Reverse(0));

    while let Some((node, _priority)) = frontier.pop() {
        result.cost += 1;
        if result.cost > max_cost {
            result.aborted = true;
            break;
        }

        let last = *node.path.last().unwrap();
        for overlap in graph.out_edges(last) {
            if overlap.target == dest {
                let distance = node.distance + overlap.distance;
                if distance <= max_distance {
                    let mut solution = node.path.clone();
                    solution.push(dest);
                    trace!("solution at distance {}: {:?}", distance, solution);
                    result.solutions.push(solution);
                }
                // paths are not extended through the destination
                continue;
            }

            let target_length = match overlap.target.contig_id().and_then(|id| graph.properties(id)) {
                Some(properties) => properties.length as i64,
                None => continue
            };
            let distance = node.distance + overlap.distance + target_length;
            // the final hop can recover at most max_overlap bases
            if distance - max_overlap > max_distance {
                continue;
            }

            let mut path = node.path.clone();
            path.push(overlap.target);
            frontier.push(SearchNode { path, distance }, Reverse(distance));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap_graph::ContigProperties;

    /// Two parallel branches between 0+ and 3+, plus a long detour through 4+.
    fn branching_graph() -> OverlapGraph {
        let mut graph = OverlapGraph::new();
        for (id, length) in [(0, 100), (1, 30), (2, 30), (3, 100), (4, 500)] {
            graph.add_vertex(id, ContigProperties::new(length, 1));
        }
        graph.add_edge(ContigNode::forward(0), ContigNode::forward(1), -24);
        graph.add_edge(ContigNode::forward(0), ContigNode::forward(2), -24);
        graph.add_edge(ContigNode::forward(1), ContigNode::forward(3), -24);
        graph.add_edge(ContigNode::forward(2), ContigNode::forward(3), -24);
        graph.add_edge(ContigNode::forward(0), ContigNode::forward(4), -24);
        graph.add_edge(ContigNode::forward(4), ContigNode::forward(3), -24);
        graph
    }

    #[test]
    fn test_two_branches() {
        let graph = branching_graph();
        // branch distance: -24 + 30 - 24 = -18; the detour through 4+ is 452 and out of range
        let result = constrained_search(&graph, ContigNode::forward(0), ContigNode::forward(3), 10, 24, 1000);
        assert!(!result.aborted);
        let mut solutions = result.solutions;
        solutions.sort();
        assert_eq!(solutions, vec![
            vec![ContigNode::forward(0), ContigNode::forward(1), ContigNode::forward(3)],
            vec![ContigNode::forward(0), ContigNode::forward(2), ContigNode::forward(3)],
        ]);
    }

    #[test]
    fn test_distance_bound_admits_detour() {
        let graph = branching_graph();
        let result = constrained_search(&graph, ContigNode::forward(0), ContigNode::forward(3), 500, 24, 1000);
        assert!(!result.aborted);
        assert_eq!(result.solutions.len(), 3);
    }

    #[test]
    fn test_no_solution() {
        let graph = branching_graph();
        // nothing points at 1- in this graph
        let result = constrained_search(&graph, ContigNode::forward(0), ContigNode::reverse(1), 100, 24, 1000);
        assert!(!result.aborted);
        assert!(result.solutions.is_empty());
    }

    #[test]
    fn test_cost_ceiling_aborts() {
        let graph = branching_graph();
        let result = constrained_search(&graph, ContigNode::forward(0), ContigNode::forward(3), 500, 24, 1);
        assert!(result.aborted);
    }
}
