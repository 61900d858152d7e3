
/*!
Multiple alignment over the residual sequences of three or more candidate paths.
The implementation is a progressive star alignment: the running consensus is globally
aligned against each remaining sequence in turn, then every input is scored against the
final consensus. Identity is the total match count normalized by both the number of
sequences and the consensus length, so identical inputs score exactly 1.
*/

use log::trace;

use crate::sequence_alignment::align_global;

/// A finished multiple alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiAlignment {
    /// The consensus over all input sequences
    consensus: Vec<u8>,
    /// Total match count of every input against the consensus
    matches: usize,
    /// Number of aligned input sequences
    num_sequences: usize
}

impl MultiAlignment {
    pub fn consensus(&self) -> &[u8] {
        &self.consensus
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn num_sequences(&self) -> usize {
        self.num_sequences
    }

    /// Average match fraction of the inputs against the consensus.
    pub fn identity(&self) -> f64 {
        if self.consensus.is_empty() || self.num_sequences == 0 {
            0.0
        } else {
            self.matches as f64 / (self.num_sequences * self.consensus.len()) as f64
        }
    }
}

/// Aligns all sequences against a progressively built consensus.
/// # Arguments
/// * `sequences` - the sequences to align; must be non-empty
pub fn align_star(sequences: &[Vec<u8>]) -> MultiAlignment {
    assert!(!sequences.is_empty());

    let mut consensus = sequences[0].clone();
    for sequence in sequences[1..].iter() {
        consensus = align_global(&consensus, sequence).consensus().to_vec();
    }

    let matches: usize = sequences.iter()
        .map(|sequence| align_global(&consensus, sequence).matches())
        .sum();
    trace!("star consensus ({} matches): {}", matches, String::from_utf8_lossy(&consensus));

    MultiAlignment {
        consensus,
        matches,
        num_sequences: sequences.len()
    }
}
