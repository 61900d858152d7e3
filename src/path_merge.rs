
/*!
This module linearizes a contig path into a single nucleotide sequence.
Adjacent contigs overlap by the edge distance (k-1 absent an edge, such as at a gap
marker junction), and the overlapping window is reconciled base by base.

The per-base rule: equal bases pass through, a wildcard ('N') loses to a concrete base,
and two differing concrete bases fail the attempt. Case marks confidence, so a position
is lower-case in the output whenever either input was lower-case. When a junction fails
at every window, a soft wildcard separator is inserted and the sequences are concatenated
without merging; this is a warning, not an error.
*/

use log::warn;

use crate::contig_node::{format_path, ContigNode};
use crate::fasta::ContigStore;
use crate::overlap_graph::OverlapGraph;

/// The hard wildcard base.
pub const WILDCARD: u8 = b'N';
/// The soft (reduced-confidence) wildcard base.
pub const SOFT_WILDCARD: u8 = b'n';

/// Applies the per-base consensus rule to one position.
/// Returns None when the bases are two differing concrete bases.
pub fn base_consensus(a: u8, b: u8) -> Option<u8> {
    let mask = a.is_ascii_lowercase() || b.is_ascii_lowercase();
    let (ua, ub) = (a.to_ascii_uppercase(), b.to_ascii_uppercase());
    let consensus = if ua == ub {
        ua
    } else if ua == WILDCARD {
        ub
    } else if ub == WILDCARD {
        ua
    } else {
        return None;
    };
    Some(if mask { consensus.to_ascii_lowercase() } else { consensus })
}

/// Applies the per-base consensus rule across two equal-length windows.
/// Returns None as soon as any position fails.
pub fn overlap_consensus(a: &[u8], b: &[u8]) -> Option<Vec<u8>> {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter())
        .map(|(&ca, &cb)| base_consensus(ca, cb))
        .collect()
}

/// Appends `next` to the accumulated sequence, reconciling the junction overlap.
/// On an unrecoverable mismatch the trailing soft wildcards of the accumulated sequence are
/// dropped one at a time and the window retried; if no window reconciles, or the accumulated
/// sequence shrinks to the window length, a soft wildcard separator is inserted and the
/// sequences are concatenated without merging.
/// # Arguments
/// * `overlap` - the junction overlap in bases
/// * `seq` - the accumulated sequence, extended in place
/// * `next` - the strand-adjusted sequence of the next node
/// * `node` - the next node, for diagnostics
/// * `path` - the full path being merged, for diagnostics
pub fn merge_contigs(overlap: usize, seq: &mut Vec<u8>, next: &[u8], node: ContigNode, path: &[ContigNode]) {
    assert!(next.len() > overlap);
    let head = &next[..overlap];
    while seq.len() > overlap {
        let tail = &seq[seq.len() - overlap..];
        if let Some(consensus) = overlap_consensus(tail, head) {
            seq.truncate(seq.len() - overlap);
            seq.extend_from_slice(&consensus);
            seq.extend_from_slice(&next[overlap..]);
            return;
        }
        if seq.last() == Some(&SOFT_WILDCARD) {
            // drop the trailing soft wildcard, sliding the window back one base
            seq.pop();
        } else {
            break;
        }
    }
    warn!(
        "the head of `{}' does not match the tail of the previous contig\n{}\n{}\n{}",
        node,
        String::from_utf8_lossy(&seq[seq.len().saturating_sub(overlap)..]),
        String::from_utf8_lossy(head),
        format_path(path)
    );
    seq.push(SOFT_WILDCARD);
    seq.extend_from_slice(next);
}

/// Merges a path into one sequence, reverse-complementing per orientation and reconciling
/// each junction overlap. The overlap of a junction is the negated graph edge distance when
/// an overlap edge exists, and k-1 otherwise.
/// # Arguments
/// * `graph` - the overlap graph providing junction distances
/// * `store` - the contig sequences
/// * `k` - the k-mer size
/// * `path` - the path to linearize
pub fn merge_path(graph: &OverlapGraph, store: &ContigStore, k: usize, path: &[ContigNode]) -> Vec<u8> {
    let mut seq: Vec<u8> = vec![];
    for (index, &node) in path.iter().enumerate() {
        let node_seq = store.node_sequence(node, k);
        if seq.is_empty() {
            seq = node_seq;
        } else {
            let overlap = match graph.distance(path[index - 1], node) {
                Some(distance) if distance < 0 => (-distance) as usize,
                _ => k - 1
            };
            merge_contigs(overlap, &mut seq, &node_seq, node, path);
        }
    }
    seq
}
