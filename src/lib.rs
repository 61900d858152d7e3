/*!
# gap_con
This library resolves ambiguous gaps in genome scaffold paths. Each gap between two
oriented contigs becomes a bounded search of the contig overlap graph; when the search
yields a small set of candidate paths, their sequences are aligned and an accepted
consensus is minted as a new contig that replaces the gap.

Key properties:
* Every candidate path must fit the estimated gap length within a configurable error
* Two candidates are merged with global alignment, three or more with a star alignment
* Gaps that stay unresolved are preserved verbatim, never guessed

# Example usage
```rust
use gap_con::contig_minter::ContigMinter;
use gap_con::contig_node::ContigNode;
use gap_con::fasta::ContigStore;
use gap_con::gap_config::GapConfigBuilder;
use gap_con::gap_registry::GapConstraint;
use gap_con::gap_resolver::{resolve_gap, ResolveStats};
use gap_con::overlap_graph::{ContigProperties, OverlapGraph};

// a bubble 0+ -> {1+ | 2+} -> 3+ whose branches disagree in one base
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

let config = GapConfigBuilder::default()
    .k(4usize)
    .min_identity(0.7)
    .build()
    .unwrap();
let constraint = GapConstraint {
    source: ContigNode::forward(0),
    dest: ContigNode::forward(3),
    dist: 2
};

let mut minter = ContigMinter::new(4);
let mut consensus_fasta: Vec<u8> = vec![];
let mut seen = vec![false; 4];
let mut stats = ResolveStats::default();
let resolved = resolve_gap(
    &graph, &store, &config, &constraint,
    &mut minter, &mut consensus_fasta, &mut seen, &mut stats
).unwrap();

// the bubble collapses into a fresh consensus contig, IUPAC W for the disagreement
assert_eq!(
    resolved,
    Some(vec![ContigNode::forward(0), ContigNode::forward(4), ContigNode::forward(3)])
);
assert_eq!(consensus_fasta, b">4 4 15 1+;2+\nACGW\n");
assert_eq!(stats.merged, 1);
```
*/

/// Bounded search for every graph path satisfying a gap constraint
pub mod constrained_search;
/// Allocation and FASTA output of newly minted consensus contigs
pub mod contig_minter;
/// Oriented contig and gap nodes, paths, and their text format
pub mod contig_node;
/// Contig sequence storage and oriented sequence access
pub mod fasta;
/// Configuration for gap resolution
pub mod gap_config;
/// Scaffold path reading and gap constraint extraction
pub mod gap_registry;
/// Per-gap classification and consensus dispatch
pub mod gap_resolver;
/// Star multiple alignment over merged candidate sequences
pub mod multi_alignment;
/// Consensus of three or more candidate paths
pub mod multi_consensus;
/// The contig overlap graph and its text format
pub mod overlap_graph;
/// Consensus of exactly two candidate paths
pub mod pair_consensus;
/// Sequence merging along a path of overlapping contigs
pub mod path_merge;
/// End-to-end orchestration of the resolution phases
pub mod pipeline;
/// Final scaffold output with resolved gaps substituted
pub mod scaffold_rewriter;
/// Basic pair-wise alignment utilities
pub mod sequence_alignment;
