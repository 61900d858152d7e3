/*!
Final scaffold output: the per-contig seen flags decide which original contigs are still
free-standing, and every scaffold path is re-emitted with its resolved gaps substituted.

A contig is suppressed (seen) while it sits inside a successful consensus; the pipeline
lifts the suppression again for contigs directly referenced by a winning resolution path
or by any scaffold path, so a direct reference always outranks suppression. Gap-carrying
paths lift suppression too: their concrete nodes reappear in the rewritten output whether
or not their gaps were resolved.
*/

use std::collections::BTreeMap;
use std::io::Write;

use crate::contig_node::{format_path, ContigNode, ContigPath};
use crate::gap_registry::{GapConstraint, ScaffoldPath};

/// Sets or clears the seen flag of every concrete contig in `path`.
/// Ids beyond the flag array belong to freshly minted contigs and are ignored.
pub fn mark_seen(seen: &mut [bool], path: &[ContigNode], flag: bool) {
    for node in path {
        if let Some(id) = node.contig_id() {
            if (id as usize) < seen.len() {
                seen[id as usize] = flag;
            }
        }
    }
}

/// Writes the output path file: a leading block with one id per line for every contig
/// whose seen flag is clear, then each scaffold path with resolved gaps substituted.
/// # Arguments
/// * `paths` - the original scaffold paths
/// * `resolutions` - the successful gap resolutions
/// * `seen` - the final per-contig seen flags
/// * `out` - the path file output
/// # Errors
/// * if the output cannot be written
pub fn write_scaffolds<W: Write>(
    paths: &[ScaffoldPath],
    resolutions: &BTreeMap<GapConstraint, ContigPath>,
    seen: &[bool],
    out: &mut W
) -> std::io::Result<()> {
    for (id, flag) in seen.iter().enumerate() {
        if !flag {
            writeln!(out, "{}", id)?;
        }
    }

    for path in paths {
        let nodes = &path.nodes;
        if nodes.len() < 3 || !path.has_gap() {
            writeln!(out, "{}\t{}", path.id, format_path(nodes))?;
            continue;
        }

        let mut rewritten: ContigPath = vec![nodes[0]];
        for i in 1..nodes.len() - 1 {
            let node = nodes[i];
            if let Some(length) = node.gap_length() {
                let key = GapConstraint {
                    source: nodes[i - 1],
                    dest: nodes[i + 1],
                    dist: length as i64
                };
                if let Some(solution) = resolutions.get(&key) {
                    // the flanking nodes are already in place; splice the interior only
                    rewritten.extend_from_slice(&solution[1..solution.len() - 1]);
                    continue;
                }
            }
            rewritten.push(node);
        }
        rewritten.push(*nodes.last().unwrap());
        writeln!(out, "{}\t{}", path.id, format_path(&rewritten))?;
    }
    Ok(())
}
