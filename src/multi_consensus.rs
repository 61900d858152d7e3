
/*!
Consensus construction for a gap with three or more candidate paths.

The candidates are trimmed to their longest common node-wise prefix and suffix, the
residual interiors are merged and multiply aligned, and an accepted consensus is minted
as a single new contig spliced between the trim boundaries. An identity of exactly 1
only arises when both trim boundaries are reverse-complement palindromes shared by all
candidates; that case returns the first candidate unmodified.
*/

use bio::alphabets::dna;
use log::{debug, trace};
use simple_error::bail;
use std::io::Write;

use crate::contig_minter::ContigMinter;
use crate::contig_node::{format_path, ContigNode, ContigPath};
use crate::fasta::ContigStore;
use crate::gap_config::GapConfig;
use crate::gap_resolver::AlignOutcome;
use crate::multi_alignment::align_star;
use crate::overlap_graph::OverlapGraph;
use crate::path_merge::merge_path;

/// Builds a consensus from three or more candidate paths sharing their endpoints.
/// # Arguments
/// * `graph` - the overlap graph
/// * `store` - the contig sequences
/// * `config` - the resolution config
/// * `solutions` - the candidate paths, all sharing first and last node
/// * `minter` - allocator for accepted consensus contigs
/// * `fasta_out` - the consensus FASTA output
/// # Errors
/// * if the candidates do not share their endpoints
/// * if the consensus FASTA cannot be written
pub fn align_multi<W: Write>(
    graph: &OverlapGraph,
    store: &ContigStore,
    config: &GapConfig,
    solutions: &[ContigPath],
    minter: &mut ContigMinter,
    fasta_out: &mut W
) -> Result<AlignOutcome, Box<dyn std::error::Error>> {
    assert!(solutions.len() > 2);
    let first = &solutions[0];
    if solutions.iter().any(|path| path.len() < 2 || path.first() != first.first() || path.last() != first.last()) {
        bail!("multi-way candidates must share their first and last node");
    }

    let min_len = solutions.iter().map(|path| path.len()).min().unwrap();

    // longest common node-wise prefix
    let mut prefix_len = 0;
    while prefix_len < min_len {
        let node = first[prefix_len];
        if solutions.iter().any(|path| path[prefix_len] != node) {
            break;
        }
        prefix_len += 1;
    }

    // longest common node-wise suffix, never overlapping the prefix
    let mut suffix_len = 0;
    while suffix_len < min_len - prefix_len {
        let node = first[first.len() - suffix_len - 1];
        if solutions.iter().any(|path| path[path.len() - suffix_len - 1] != node) {
            break;
        }
        suffix_len += 1;
    }

    let prefix = &first[..prefix_len];
    let suffix = &first[first.len() - suffix_len..];
    assert!(prefix_len > 0 && suffix_len > 0);
    if prefix_len + suffix_len > 2 {
        debug!("common prefix/suffix: {} * {}", format_path(prefix), format_path(suffix));
    }

    // merge each candidate's residual interior
    let mut residuals: Vec<Vec<u8>> = vec![];
    let mut coverage = 0u64;
    for path in solutions.iter() {
        let residual = &path[prefix_len..path.len() - suffix_len];
        if residual.is_empty() {
            // the prefix and suffix paths overlap by k-1 bases
            let boundary = store.node_sequence(first[prefix_len - 1], config.k);
            residuals.push(boundary[boundary.len() - (config.k - 1)..].to_vec());
        } else {
            residuals.push(merge_path(graph, store, config.k, residual));
            coverage += graph.path_properties(residual).coverage;
        }
    }

    let min_length = residuals.iter().map(|seq| seq.len()).min().unwrap();
    let max_length = residuals.iter().map(|seq| seq.len()).max().unwrap();
    let length_ratio = min_length as f64 / max_length as f64;
    if length_ratio < config.min_identity {
        debug!("{}\t{}\t{:.4}\t(different length)", min_length, max_length, length_ratio);
        return Ok(AlignOutcome::Dissimilar);
    }

    let alignment = align_star(&residuals);
    trace!("{}", String::from_utf8_lossy(alignment.consensus()));
    let identity = alignment.identity();
    debug!("multi identity {:.4}{}", identity, if identity < config.min_identity { " (too low)" } else { "" });
    if identity < config.min_identity {
        return Ok(AlignOutcome::IdentityTooLow);
    }

    if identity == 1.0 {
        // a perfect match across every residual must be caused by two palindromic boundaries
        let palindrome0 = first[prefix_len];
        let palindrome1 = first[first.len() - suffix_len - 1];
        debug!("Palindrome: {}", palindrome0);
        debug!("Palindrome: {}", palindrome1);
        debug_assert!(solutions.iter().all(|path| path.len() == first.len()));
        debug_assert!(is_self_palindrome(store, palindrome0, config.k));
        debug_assert!(is_self_palindrome(store, palindrome1, config.k));
        return Ok(AlignOutcome::Accepted(first.clone()));
    }

    let id = minter.mint(solutions, prefix_len, suffix_len, alignment.consensus(), coverage, fasta_out)?;
    let mut path: ContigPath = prefix.to_vec();
    path.push(ContigNode::forward(id));
    path.extend_from_slice(suffix);
    Ok(AlignOutcome::Accepted(path))
}

/// Returns true if a contig's sequence equals its own reverse complement.
fn is_self_palindrome(store: &ContigStore, node: ContigNode, k: usize) -> bool {
    match node.contig_id() {
        Some(_) => {
            let seq = store.node_sequence(node, k);
            seq == dna::revcomp(&seq)
        }
        None => false
    }
}
