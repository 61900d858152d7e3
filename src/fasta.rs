
/*!
Contig sequence storage with an orientation-aware accessor.
Contigs are loaded from a FASTA file whose record ids are the numeric contig ids, numbered sequentially from zero.
*/

use bio::alphabets::dna;
use bio::io::fasta;
use log::info;
use simple_error::bail;
use std::path::Path;

use crate::contig_node::{ContigNode, Orientation};

/// In-memory store of the input contig sequences, indexed by contig id.
#[derive(Clone, Debug, Default)]
pub struct ContigStore {
    /// The contig sequences; index is the contig id
    sequences: Vec<Vec<u8>>
}

impl ContigStore {
    /// Creates a store from pre-loaded sequences, index equals contig id.
    pub fn new(sequences: Vec<Vec<u8>>) -> ContigStore {
        ContigStore {
            sequences
        }
    }

    /// Loads contigs from a FASTA file. Records must be numbered sequentially from zero.
    /// # Arguments
    /// * `path` - the FASTA file to read
    /// # Errors
    /// * if the file cannot be read or parsed
    /// * if a record id is not the next sequential contig id
    pub fn from_file(path: &Path) -> Result<ContigStore, Box<dyn std::error::Error>> {
        info!("Reading {:?}...", path);
        let reader = fasta::Reader::from_file(path)?;
        let mut sequences: Vec<Vec<u8>> = vec![];
        for result in reader.records() {
            let record = result?;
            let id: usize = match record.id().parse() {
                Ok(v) => v,
                Err(_) => bail!("contig id `{}' is not numeric", record.id())
            };
            if id != sequences.len() {
                bail!("contig id `{}' is out of order, expected {}", record.id(), sequences.len());
            }
            sequences.push(record.seq().to_vec());
        }
        if sequences.is_empty() {
            bail!("no contigs found in {:?}", path);
        }
        Ok(ContigStore::new(sequences))
    }

    /// Returns the number of stored contigs.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns the stored (forward strand) sequence of a contig.
    pub fn sequence(&self, id: u32) -> &[u8] {
        &self.sequences[id as usize]
    }

    /// Returns the sequence of a path node, adjusted for orientation.
    /// Gap markers yield their placeholder: `length` wildcard bases, soft-masked when the
    /// estimate is below k, and left-padded with k-1 wildcards to absorb the junction overlap.
    /// # Arguments
    /// * `node` - the node to fetch the sequence for
    /// * `k` - the k-mer size, which fixes the junction overlap at k-1
    pub fn node_sequence(&self, node: ContigNode, k: usize) -> Vec<u8> {
        match node {
            ContigNode::Contig { id, orientation } => {
                let seq = self.sequence(id);
                match orientation {
                    Orientation::Forward => seq.to_vec(),
                    Orientation::Reverse => dna::revcomp(seq)
                }
            }
            ContigNode::Gap { length } => {
                let mut placeholder = vec![b'N'; length];
                if length < k {
                    placeholder.make_ascii_lowercase();
                }
                let mut seq = vec![b'N'; k - 1];
                seq.extend_from_slice(&placeholder);
                seq
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_reverse() {
        let store = ContigStore::new(vec![b"ACGTT".to_vec()]);
        assert_eq!(store.node_sequence(ContigNode::forward(0), 4), b"ACGTT");
        assert_eq!(store.node_sequence(ContigNode::reverse(0), 4), b"AACGT");
    }

    #[test]
    fn test_case_preserving_revcomp() {
        // soft-masked bases stay soft-masked on the opposite strand
        let store = ContigStore::new(vec![b"ACgt".to_vec()]);
        assert_eq!(store.node_sequence(ContigNode::reverse(0), 4), b"acGT");
    }

    #[test]
    fn test_gap_placeholder() {
        let store = ContigStore::new(vec![]);
        // k-1 hard wildcards of padding, then the estimated length
        assert_eq!(store.node_sequence(ContigNode::gap(5), 4), b"NNNNNNNN");
        // estimates below k are soft-masked
        assert_eq!(store.node_sequence(ContigNode::gap(2), 4), b"NNNnn");
    }
}
