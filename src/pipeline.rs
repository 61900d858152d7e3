/*!
The batch pipeline: read contigs, graph, and scaffold paths; resolve every ambiguous gap
strictly sequentially; then write the consensus FASTA, the rewritten path file, and
optionally the graph with the new consensus contigs spliced in.

Resolution is a two-phase protocol. The registration phase produces an immutable
constraint list, the resolution phase produces a constraint to replacement-path map that
the rewriter consumes read-only. The only state carried across resolutions is the
contig-id counter, the pending splice list, and the seen flags.
*/

use log::info;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::contig_minter::ContigMinter;
use crate::contig_node::ContigPath;
use crate::fasta::ContigStore;
use crate::gap_config::GapConfig;
use crate::gap_registry::{collect_constraints, read_scaffold_paths, GapConstraint, ScaffoldPath};
use crate::gap_resolver::{resolve_gap, ResolveStats};
use crate::overlap_graph::{ContigProperties, OverlapGraph};
use crate::scaffold_rewriter::{mark_seen, write_scaffolds};

/// Resolves every gap constraint in order, returning the resolution map, the per-contig
/// seen flags as they stand after resolution, and the outcome counters.
/// # Errors
/// * if a consensus record cannot be written
pub fn resolve_all<W: Write>(
    graph: &OverlapGraph,
    store: &ContigStore,
    config: &GapConfig,
    constraints: &[GapConstraint],
    minter: &mut ContigMinter,
    fasta_out: &mut W
) -> Result<(BTreeMap<GapConstraint, ContigPath>, Vec<bool>, ResolveStats), Box<dyn std::error::Error>> {
    let mut resolutions = BTreeMap::new();
    let mut seen = vec![false; store.len()];
    let mut stats = ResolveStats::default();
    for constraint in constraints {
        if let Some(path) = resolve_gap(
            graph, store, config, constraint, minter, fasta_out, &mut seen, &mut stats
        )? {
            resolutions.insert(*constraint, path);
        }
    }
    Ok((resolutions, seen, stats))
}

/// Lifts the suppression of every contig that stays directly referenced, either by a
/// winning resolution path or by a scaffold path. Runs once, after all gaps are resolved.
pub fn clear_direct_references(
    seen: &mut [bool],
    resolutions: &BTreeMap<GapConstraint, ContigPath>,
    paths: &[ScaffoldPath]
) {
    for path in resolutions.values() {
        mark_seen(seen, path, false);
    }
    for path in paths {
        mark_seen(seen, &path.nodes, false);
    }
}

/// Adds the pending consensus contigs to the graph, each overlapping its two flanking
/// nodes by k-1 bases.
pub fn apply_splices(graph: &mut OverlapGraph, minter: &ContigMinter, k: usize) {
    let overlap = -((k as i64) - 1);
    for vertex in minter.pending() {
        let id = vertex.node.contig_id().unwrap();
        graph.add_vertex(id, ContigProperties::new(vertex.length, vertex.coverage));
        graph.add_edge(vertex.predecessor, vertex.node, overlap);
        graph.add_edge(vertex.node, vertex.successor, overlap);
    }
}

/// The first id available for minted contigs: above every contig id and above every
/// numeric scaffold path id.
fn starting_id(store: &ContigStore, paths: &[ScaffoldPath]) -> u32 {
    let max_path_id = paths.iter()
        .filter_map(|path| path.id.parse::<u32>().ok())
        .max();
    (store.len() as u32).max(max_path_id.map_or(0, |id| id + 1))
}

fn open_paths(paths_file: &str) -> io::Result<Box<dyn BufRead>> {
    if paths_file == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(paths_file)?)))
    }
}

/// Runs the whole pipeline against the given files.
/// # Arguments
/// * `config` - the resolution config
/// * `contigs_file` - the contig FASTA
/// * `graph_file` - the overlap graph
/// * `paths_file` - the scaffold path file, `-` for standard input
/// * `out_file` - the rewritten path file to write
/// * `consensus_file` - the consensus FASTA to write
/// * `graph_out` - optional path for the graph with the new contigs spliced in
/// # Errors
/// * if the config is invalid or any input cannot be read or parsed
/// * if any output cannot be written
pub fn run(
    config: &GapConfig,
    contigs_file: &Path,
    graph_file: &Path,
    paths_file: &str,
    out_file: &Path,
    consensus_file: &Path,
    graph_out: Option<&Path>
) -> Result<ResolveStats, Box<dyn std::error::Error>> {
    config.validate()?;

    let store = ContigStore::from_file(contigs_file)?;
    let mut graph = OverlapGraph::from_reader(BufReader::new(File::open(graph_file)?))?;
    let paths = read_scaffold_paths(open_paths(paths_file)?)?;
    let constraints = collect_constraints(&paths);
    info!("read {} contigs, {} graph vertices, {} gap constraints",
        store.len(), graph.num_vertices(), constraints.len());

    let mut minter = ContigMinter::new(starting_id(&store, &paths));
    let mut fasta_out = BufWriter::new(File::create(consensus_file)?);
    let (resolutions, mut seen, stats) =
        resolve_all(&graph, &store, config, &constraints, &mut minter, &mut fasta_out)?;
    fasta_out.flush()?;

    clear_direct_references(&mut seen, &resolutions, &paths);

    let mut out = BufWriter::new(File::create(out_file)?);
    write_scaffolds(&paths, &resolutions, &seen, &mut out)?;
    out.flush()?;

    if let Some(graph_path) = graph_out {
        apply_splices(&mut graph, &minter, config.k);
        let mut graph_writer = BufWriter::new(File::create(graph_path)?);
        graph.write(&mut graph_writer)?;
        graph_writer.flush()?;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contig_node::ContigNode;
    use crate::gap_config::GapConfigBuilder;

    /// A bubble 0+ -> {1+ | 2+} -> 3+ with interiors "ACGT" and "ACGA", k = 4,
    /// and one scaffold path spanning the bubble with an estimated 2-base gap.
    fn bubble_setup() -> (OverlapGraph, ContigStore, Vec<ScaffoldPath>) {
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
        let paths = vec![ScaffoldPath {
            id: "scaf0".to_string(),
            nodes: vec![ContigNode::forward(0), ContigNode::gap(2), ContigNode::forward(3)]
        }];
        (graph, store, paths)
    }

    #[test_log::test]
    fn test_resolve_all_end_to_end() {
        let (graph, store, paths) = bubble_setup();
        let config = GapConfigBuilder::default()
            .k(4usize)
            .min_identity(0.7)
            .build()
            .unwrap();
        let constraints = collect_constraints(&paths);
        assert_eq!(constraints.len(), 1);

        let mut minter = ContigMinter::new(starting_id(&store, &paths));
        assert_eq!(minter.next_id(), 4);
        let mut fasta_out: Vec<u8> = vec![];
        let (resolutions, mut seen, stats) =
            resolve_all(&graph, &store, &config, &constraints, &mut minter, &mut fasta_out).unwrap();

        assert_eq!(stats.ambiguous_gaps, 1);
        assert_eq!(stats.merged, 1);
        assert_eq!(fasta_out, b">4 4 15 1+;2+\nACGW\n");
        assert_eq!(
            resolutions.get(&constraints[0]),
            Some(&vec![ContigNode::forward(0), ContigNode::forward(4), ContigNode::forward(3)])
        );
        assert_eq!(seen, vec![true, true, true, true]);

        clear_direct_references(&mut seen, &resolutions, &paths);
        assert_eq!(seen, vec![false, true, true, false]);

        let mut out: Vec<u8> = vec![];
        write_scaffolds(&paths, &resolutions, &seen, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n3\nscaf0\t0+ 4+ 3+\n");
    }

    #[test_log::test]
    fn test_apply_splices() {
        let (mut graph, store, paths) = bubble_setup();
        let config = GapConfigBuilder::default()
            .k(4usize)
            .min_identity(0.7)
            .build()
            .unwrap();
        let constraints = collect_constraints(&paths);
        let mut minter = ContigMinter::new(starting_id(&store, &paths));
        let mut fasta_out: Vec<u8> = vec![];
        resolve_all(&graph, &store, &config, &constraints, &mut minter, &mut fasta_out).unwrap();

        apply_splices(&mut graph, &minter, config.k);
        assert_eq!(graph.num_vertices(), 5);
        let minted = graph.properties(4).unwrap();
        assert_eq!(minted.length, 4);
        assert_eq!(minted.coverage, 15);
        assert_eq!(graph.distance(ContigNode::forward(0), ContigNode::forward(4)), Some(-3));
        assert_eq!(graph.distance(ContigNode::forward(4), ContigNode::forward(3)), Some(-3));
    }

    #[test]
    fn test_starting_id_covers_numeric_path_ids() {
        let (_graph, store, _paths) = bubble_setup();
        let paths = vec![ScaffoldPath { id: "17".to_string(), nodes: vec![ContigNode::forward(0)] }];
        assert_eq!(starting_id(&store, &paths), 18);
        let paths = vec![ScaffoldPath { id: "scaf0".to_string(), nodes: vec![ContigNode::forward(0)] }];
        assert_eq!(starting_id(&store, &paths), 4);
    }
}
