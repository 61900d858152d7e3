
/*!
Consensus construction for a gap with exactly two candidate paths.

Three regimes, mirroring the ways two candidates can relate:
* one interior is empty (a direct edge against a detour): the detour is merged, soft-masked
  beyond its anchoring k-1 bases, and accepted on the anchor fraction alone;
* the merged interiors are byte-identical: a reverse-complement palindrome (equal length)
  or a transitive-edge artifact (unequal length), both returned without minting a contig
  for the palindrome and without alignment for either;
* otherwise the interiors are globally aligned and the alignment consensus is minted.
*/

use log::{debug, trace, warn};
use simple_error::bail;
use std::io::Write;

use crate::contig_minter::ContigMinter;
use crate::contig_node::{format_path, ContigNode, ContigPath};
use crate::fasta::ContigStore;
use crate::gap_config::GapConfig;
use crate::gap_resolver::AlignOutcome;
use crate::overlap_graph::OverlapGraph;
use crate::path_merge::merge_path;
use crate::sequence_alignment::align_global;

/// Builds a consensus from exactly two candidate paths sharing their endpoints.
/// # Arguments
/// * `graph` - the overlap graph
/// * `store` - the contig sequences
/// * `config` - the resolution config
/// * `solutions` - exactly two candidate paths
/// * `minter` - allocator for accepted consensus contigs
/// * `fasta_out` - the consensus FASTA output
/// # Errors
/// * if a candidate violates the shared-endpoint contract
/// * if the consensus FASTA cannot be written
pub fn align_pair<W: Write>(
    graph: &OverlapGraph,
    store: &ContigStore,
    config: &GapConfig,
    solutions: &[ContigPath],
    minter: &mut ContigMinter,
    fasta_out: &mut W
) -> Result<AlignOutcome, Box<dyn std::error::Error>> {
    assert_eq!(solutions.len(), 2);
    let (first, second) = (&solutions[0], &solutions[1]);
    if first.len() < 2 || second.len() < 2 || first.first() != second.first() || first.last() != second.last() {
        bail!("pairwise candidates must share their first and last node");
    }

    let first_interior = &first[1..first.len() - 1];
    let second_interior = &second[1..second.len() - 1];

    if first_interior.is_empty() || second_interior.is_empty() {
        // a direct edge against a detour; the detour's sequence may be entirely deleted
        let interior = if first_interior.is_empty() { second_interior } else { first_interior };
        let mut consensus = merge_path(graph, store, config.k, interior);
        if consensus.len() < config.k {
            bail!("detour interior `{}' is shorter than k", format_path(interior));
        }
        // only the k-1 anchor bases are corroborated, the rest is reduced confidence
        consensus[config.k - 1..].make_ascii_lowercase();

        let matches = config.k - 1;
        let identity = matches as f64 / consensus.len() as f64;
        trace!("{}", String::from_utf8_lossy(&consensus));
        debug!("pair identity {:.4}{}", identity, if identity < config.min_identity { " (too low)" } else { "" });
        if identity < config.min_identity {
            return Ok(AlignOutcome::IdentityTooLow);
        }

        let coverage = graph.path_properties(interior).coverage;
        let id = minter.mint(solutions, 1, 1, &consensus, coverage, fasta_out)?;
        return Ok(AlignOutcome::Accepted(vec![first[0], ContigNode::forward(id), *first.last().unwrap()]));
    }

    let first_seq = merge_path(graph, store, config.k, first_interior);
    let second_seq = merge_path(graph, store, config.k, second_interior);
    if first_seq == second_seq {
        if first_interior.len() == second_interior.len() {
            // identical sequence over distinct equal-length paths: a palindromic contig
            let mismatch = first_interior.iter().zip(second_interior.iter())
                .find(|(a, b)| a != b);
            debug_assert!(mismatch.map_or(false, |(a, b)| *a == b.complement()));
            if let Some((node, _)) = mismatch {
                debug!("Palindrome: {}", node);
            }
            return Ok(AlignOutcome::Accepted(first.clone()));
        }
        // identical sequence of unequal node count: a transitive edge in the overlap graph
        warn!(
            "two paths have identical sequence, which may be caused by a transitive edge in the overlap graph\n\t{}\n\t{}",
            format_path(first_interior),
            format_path(second_interior)
        );
        let longer = if first_interior.len() > second_interior.len() { first } else { second };
        return Ok(AlignOutcome::Accepted(longer.clone()));
    }

    let min_length = first_seq.len().min(second_seq.len());
    let max_length = first_seq.len().max(second_seq.len());
    let length_ratio = min_length as f64 / max_length as f64;
    if length_ratio < config.min_identity {
        debug!("{}\t{}\t{:.4}\t(different length)", min_length, max_length, length_ratio);
        return Ok(AlignOutcome::Dissimilar);
    }

    let alignment = align_global(&first_seq, &second_seq);
    trace!("{}", String::from_utf8_lossy(alignment.consensus()));
    let identity = alignment.identity();
    debug!("pair identity {:.4}{}", identity, if identity < config.min_identity { " (too low)" } else { "" });
    if identity < config.min_identity {
        return Ok(AlignOutcome::IdentityTooLow);
    }

    let coverage = graph.path_properties(first_interior).coverage + graph.path_properties(second_interior).coverage;
    let id = minter.mint(solutions, 1, 1, alignment.consensus(), coverage, fasta_out)?;
    Ok(AlignOutcome::Accepted(vec![first[0], ContigNode::forward(id), *first.last().unwrap()]))
}
