
/*!
Allocation of new contig identities for accepted consensus sequences.
The minter hands out monotonically increasing ids starting above everything already seen,
records a pending graph-splice request for each minted contig, and emits the FASTA record
describing the consensus and the branch paths it summarizes.
*/

use itertools::Itertools;
use simple_error::bail;
use std::io::Write;

use crate::contig_node::{ContigNode, ContigPath};

/// A pending graph splice for a minted consensus contig.
/// It is materialized only if the graph is re-emitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NewVertex {
    /// The node preceding the new contig in the accepted path
    pub predecessor: ContigNode,
    /// The minted node itself
    pub node: ContigNode,
    /// The node following the new contig in the accepted path
    pub successor: ContigNode,
    /// Consensus sequence length
    pub length: usize,
    /// Summed coverage of the contributing branches
    pub coverage: u64
}

/// Allocates new contig identities and writes their FASTA records.
#[derive(Debug)]
pub struct ContigMinter {
    /// The next id to hand out
    next_id: u32,
    /// Pending graph splices, in mint order
    pending: Vec<NewVertex>
}

impl ContigMinter {
    /// Creates a minter whose first id is `next_id`.
    /// The caller picks a value above every contig id and numeric scaffold path id.
    pub fn new(next_id: u32) -> ContigMinter {
        ContigMinter {
            next_id,
            pending: vec![]
        }
    }

    /// Mints a new contig for an accepted consensus and writes its FASTA record.
    /// The record header carries the id, length, coverage, and one semicolon-separated
    /// field per branch listing that branch's nodes outside the shared prefix/suffix
    /// (`*` for an empty residual).
    /// # Arguments
    /// * `solutions` - the candidate paths the consensus summarizes
    /// * `prefix_len` - length of the node-wise prefix shared by all candidates
    /// * `suffix_len` - length of the node-wise suffix shared by all candidates
    /// * `consensus` - the accepted consensus sequence
    /// * `coverage` - summed coverage of the contributing branches
    /// * `out` - the consensus FASTA output
    /// # Errors
    /// * if the solutions or the shared prefix/suffix are empty
    /// * if the record cannot be written
    pub fn mint<W: Write>(
        &mut self,
        solutions: &[ContigPath],
        prefix_len: usize,
        suffix_len: usize,
        consensus: &[u8],
        coverage: u64,
        out: &mut W
    ) -> Result<u32, Box<dyn std::error::Error>> {
        if solutions.is_empty() || prefix_len == 0 || suffix_len == 0 {
            bail!("cannot mint a contig without solutions and shared endpoints");
        }

        let id = self.next_id;
        self.next_id += 1;

        let first = &solutions[0];
        self.pending.push(NewVertex {
            predecessor: first[prefix_len - 1],
            node: ContigNode::forward(id),
            successor: first[first.len() - suffix_len],
            length: consensus.len(),
            coverage
        });

        let branches = solutions.iter()
            .map(|path| {
                let residual = &path[prefix_len..path.len() - suffix_len];
                if residual.is_empty() {
                    "*".to_string()
                } else {
                    residual.iter().join(",")
                }
            })
            .join(";");
        writeln!(out, ">{} {} {} {}", id, consensus.len(), coverage, branches)?;
        out.write_all(consensus)?;
        writeln!(out)?;

        Ok(id)
    }

    // getters
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn pending(&self) -> &[NewVertex] {
        &self.pending
    }
}
