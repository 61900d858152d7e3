/*!
Resolution of a single ambiguous gap.

Each gap constraint is turned into a bounded search between its flanking nodes; the
candidate paths that survive the distance bound are classified and, where possible,
collapsed into a single consensus path. Every contig of every candidate of a resolved
gap is marked seen, so the final scaffold output does not emit it a second time as a
free-standing path.
*/

use log::debug;
use std::fmt;
use std::io::Write;

use crate::constrained_search::constrained_search;
use crate::contig_minter::ContigMinter;
use crate::contig_node::ContigPath;
use crate::fasta::ContigStore;
use crate::gap_config::GapConfig;
use crate::gap_registry::GapConstraint;
use crate::multi_consensus::align_multi;
use crate::overlap_graph::OverlapGraph;
use crate::pair_consensus::align_pair;
use crate::scaffold_rewriter::mark_seen;

/// The result of aligning the candidate paths of one gap.
#[derive(Clone, Debug, PartialEq)]
pub enum AlignOutcome {
    /// The candidates collapsed into this replacement path
    Accepted(ContigPath),
    /// The consensus identity fell below the acceptance threshold
    IdentityTooLow,
    /// The candidate sequences differ too much in length to be aligned
    Dissimilar
}

/// Running counts of how the ambiguous gaps were classified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolveStats {
    /// Gaps for which a resolution was attempted
    pub ambiguous_gaps: usize,
    /// Gaps replaced by a single unambiguous path
    pub merged: usize,
    /// Gaps with no candidate path within the distance bound
    pub no_solution: usize,
    /// Gaps with more candidates than the branch limit
    pub too_many_solutions: usize,
    /// Gaps whose search exceeded the cost ceiling
    pub too_complex: usize,
    /// Gaps rejected by the consensus identity threshold
    pub identity_too_low: usize,
    /// Gaps rejected by the candidate length ratio
    pub dissimilar: usize
}

impl fmt::Display for ResolveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ambiguous gaps: {}", self.ambiguous_gaps)?;
        writeln!(f, "Merged:         {}", self.merged)?;
        writeln!(f, "No paths:       {}", self.no_solution)?;
        writeln!(f, "Too many paths: {}", self.too_many_solutions)?;
        writeln!(f, "Too complex:    {}", self.too_complex)?;
        writeln!(f, "Dissimilar:     {}", self.dissimilar)?;
        write!(f, "Identity too low: {}", self.identity_too_low)
    }
}

/// Attempts to replace one gap constraint with an unambiguous path.
///
/// Returns the replacement path on success and `None` when the gap stays unresolved,
/// bumping the matching counter in `stats` either way.
/// # Arguments
/// * `graph` - the overlap graph
/// * `store` - the contig sequences
/// * `config` - the resolution config
/// * `constraint` - the gap to resolve
/// * `minter` - allocator for accepted consensus contigs
/// * `fasta_out` - the consensus FASTA output
/// * `seen` - per-contig seen flags, indexed by contig id
/// * `stats` - classification counters
/// # Errors
/// * if a consensus record cannot be written
/// * if the candidate paths violate the shared-endpoint contract
pub fn resolve_gap<W: Write>(
    graph: &OverlapGraph,
    store: &ContigStore,
    config: &GapConfig,
    constraint: &GapConstraint,
    minter: &mut ContigMinter,
    fasta_out: &mut W,
    seen: &mut [bool],
    stats: &mut ResolveStats
) -> Result<Option<ContigPath>, Box<dyn std::error::Error>> {
    stats.ambiguous_gaps += 1;

    let max_distance = constraint.dist + config.distance_error;
    let mut search = constrained_search(
        graph,
        constraint.source,
        constraint.dest,
        max_distance,
        (config.k - 1) as i64,
        config.max_cost
    );
    debug!(
        "{} -> {}: dist = {}: {} solution(s) at cost {}",
        constraint.source, constraint.dest, constraint.dist,
        search.solutions.len(), search.cost
    );

    if search.aborted {
        stats.too_complex += 1;
        return Ok(None);
    }
    if search.solutions.len() > config.max_branches {
        stats.too_many_solutions += 1;
        return Ok(None);
    }
    if search.solutions.is_empty() {
        stats.no_solution += 1;
        return Ok(None);
    }
    if search.solutions.len() == 1 {
        let solution = search.solutions.into_iter().next().unwrap();
        mark_seen(seen, &solution, true);
        stats.merged += 1;
        return Ok(Some(solution));
    }

    // the frontier pops equal distances in arbitrary order; sort for reproducible output
    search.solutions.sort();
    let outcome = if search.solutions.len() == 2 {
        align_pair(graph, store, config, &search.solutions, minter, fasta_out)?
    } else {
        align_multi(graph, store, config, &search.solutions, minter, fasta_out)?
    };
    match outcome {
        AlignOutcome::Accepted(path) => {
            for solution in search.solutions.iter() {
                mark_seen(seen, solution, true);
            }
            stats.merged += 1;
            Ok(Some(path))
        }
        AlignOutcome::IdentityTooLow => {
            stats.identity_too_low += 1;
            Ok(None)
        }
        AlignOutcome::Dissimilar => {
            stats.dissimilar += 1;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contig_node::ContigNode;
    use crate::gap_config::GapConfigBuilder;
    use crate::overlap_graph::ContigProperties;

    /// A bubble 0+ -> {1+ | 2+} -> 3+ with interiors "ACGT" and "ACGA", k = 4.
    fn bubble_setup() -> (OverlapGraph, ContigStore) {
        let mut graph = OverlapGraph::new();
        graph.add_vertex(0, ContigProperties::new(8, 20));
        graph.add_vertex(1, ContigProperties::new(4, 10));
        graph.add_vertex(2, ContigProperties::new(4, 5));
        graph.add_vertex(3, ContigProperties::new(8, 20));
        graph.add_edge(ContigNode::forward(0), ContigNode::forward(1), -3);
        graph.add_edge(ContigNode::forward(0), ContigNode::forward(2), -3);
        graph.add_edge(ContigNode::forward(1), ContigNode::forward(3), -3);
        graph.add_edge(ContigNode::forward(2), ContigNode::forward(3), -3);
        let store = ContigStore::new(vec![
            b"TTTTTACG".to_vec(),
            b"ACGT".to_vec(),
            b"ACGA".to_vec(),
            b"CGTAAAAA".to_vec()
        ]);
        (graph, store)
    }

    fn config(min_identity: f64) -> GapConfig {
        GapConfigBuilder::default()
            .k(4usize)
            .min_identity(min_identity)
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_single_candidate_accepted_verbatim() {
        let (mut graph, store) = bubble_setup();
        // remove the second branch by rebuilding without it
        let mut lone = OverlapGraph::new();
        for id in [0u32, 1, 3] {
            lone.add_vertex(id, graph.properties(id).unwrap());
        }
        lone.add_edge(ContigNode::forward(0), ContigNode::forward(1), -3);
        lone.add_edge(ContigNode::forward(1), ContigNode::forward(3), -3);
        graph = lone;

        let constraint = GapConstraint {
            source: ContigNode::forward(0),
            dest: ContigNode::forward(3),
            dist: 2
        };
        let mut minter = ContigMinter::new(4);
        let mut out: Vec<u8> = vec![];
        let mut seen = vec![false; 4];
        let mut stats = ResolveStats::default();
        let resolved = resolve_gap(
            &graph, &store, &config(0.9), &constraint,
            &mut minter, &mut out, &mut seen, &mut stats
        ).unwrap();
        assert_eq!(
            resolved,
            Some(vec![ContigNode::forward(0), ContigNode::forward(1), ContigNode::forward(3)])
        );
        assert_eq!(stats.merged, 1);
        assert!(seen[0] && seen[1] && seen[3]);
        assert!(out.is_empty());
    }

    #[test_log::test]
    fn test_no_solution() {
        let (graph, store) = bubble_setup();
        let constraint = GapConstraint {
            source: ContigNode::forward(3),
            dest: ContigNode::forward(0),
            dist: 2
        };
        let mut minter = ContigMinter::new(4);
        let mut out: Vec<u8> = vec![];
        let mut seen = vec![false; 4];
        let mut stats = ResolveStats::default();
        let resolved = resolve_gap(
            &graph, &store, &config(0.9), &constraint,
            &mut minter, &mut out, &mut seen, &mut stats
        ).unwrap();
        assert_eq!(resolved, None);
        assert_eq!(stats.no_solution, 1);
        assert!(seen.iter().all(|flag| !flag));
    }

    #[test_log::test]
    fn test_too_many_solutions() {
        let mut graph = OverlapGraph::new();
        graph.add_vertex(0, ContigProperties::new(8, 20));
        graph.add_vertex(6, ContigProperties::new(8, 20));
        let mut sequences = vec![b"TTTTTACG".to_vec()];
        for id in 1u32..=5 {
            graph.add_vertex(id, ContigProperties::new(4, 5));
            graph.add_edge(ContigNode::forward(0), ContigNode::forward(id), -3);
            graph.add_edge(ContigNode::forward(id), ContigNode::forward(6), -3);
            sequences.push(b"ACGT".to_vec());
        }
        sequences.push(b"CGTAAAAA".to_vec());
        // the store indexes by id, so contig 6's sequence must come after 1..=5
        let store = ContigStore::new(sequences);

        let constraint = GapConstraint {
            source: ContigNode::forward(0),
            dest: ContigNode::forward(6),
            dist: 2
        };
        let mut minter = ContigMinter::new(7);
        let mut out: Vec<u8> = vec![];
        let mut seen = vec![false; 7];
        let mut stats = ResolveStats::default();
        let resolved = resolve_gap(
            &graph, &store, &config(0.9), &constraint,
            &mut minter, &mut out, &mut seen, &mut stats
        ).unwrap();
        assert_eq!(resolved, None);
        assert_eq!(stats.too_many_solutions, 1);
    }

    #[test_log::test]
    fn test_cost_ceiling_counts_as_too_complex() {
        let (graph, store) = bubble_setup();
        let constraint = GapConstraint {
            source: ContigNode::forward(0),
            dest: ContigNode::forward(3),
            dist: 2
        };
        let config = GapConfigBuilder::default()
            .k(4usize)
            .max_cost(1usize)
            .build()
            .unwrap();
        let mut minter = ContigMinter::new(4);
        let mut out: Vec<u8> = vec![];
        let mut seen = vec![false; 4];
        let mut stats = ResolveStats::default();
        let resolved = resolve_gap(
            &graph, &store, &config, &constraint,
            &mut minter, &mut out, &mut seen, &mut stats
        ).unwrap();
        assert_eq!(resolved, None);
        assert_eq!(stats.too_complex, 1);
    }

    #[test_log::test]
    fn test_two_candidates_merge_to_consensus() {
        let (graph, store) = bubble_setup();
        let constraint = GapConstraint {
            source: ContigNode::forward(0),
            dest: ContigNode::forward(3),
            dist: 2
        };
        let mut minter = ContigMinter::new(4);
        let mut out: Vec<u8> = vec![];
        let mut seen = vec![false; 4];
        let mut stats = ResolveStats::default();
        let resolved = resolve_gap(
            &graph, &store, &config(0.7), &constraint,
            &mut minter, &mut out, &mut seen, &mut stats
        ).unwrap();
        assert_eq!(
            resolved,
            Some(vec![ContigNode::forward(0), ContigNode::forward(4), ContigNode::forward(3)])
        );
        assert_eq!(stats.merged, 1);
        assert!(seen[0] && seen[1] && seen[2] && seen[3]);
        assert_eq!(out, b">4 4 15 1+;2+\nACGW\n");
    }
}
