
/*!
Scaffold path reading and ambiguous-gap constraint extraction.
A gap constraint is registered for every interior gap marker flanked by concrete contigs;
identical constraints arising from multiple scaffold occurrences are deduplicated and
resolved exactly once.
*/

use log::info;
use simple_error::bail;
use std::collections::BTreeSet;
use std::io::BufRead;

use crate::contig_node::{parse_path, ContigNode, ContigPath};

/// One search constraint derived from an ambiguous gap.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GapConstraint {
    /// The concrete node preceding the gap
    pub source: ContigNode,
    /// The concrete node following the gap
    pub dest: ContigNode,
    /// The estimated gap length in bases
    pub dist: i64
}

/// One scaffold path, as read from the path file.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaffoldPath {
    /// The path identifier token
    pub id: String,
    /// The ordered, oriented node chain
    pub nodes: ContigPath
}

impl ScaffoldPath {
    /// Returns true if the path contains any gap marker.
    pub fn has_gap(&self) -> bool {
        self.nodes.iter().any(|node| node.is_gap())
    }
}

/// Reads scaffold paths, one per line: path id, then whitespace-separated node tokens.
/// # Errors
/// * if a line has no nodes or a node token is malformed
pub fn read_scaffold_paths<R: BufRead>(reader: R) -> Result<Vec<ScaffoldPath>, Box<dyn std::error::Error>> {
    let mut paths = vec![];
    for result in reader.lines() {
        let line = result?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (id, rest) = match trimmed.split_once(char::is_whitespace) {
            Some(split) => split,
            None => bail!("scaffold path line `{}' has no nodes", trimmed)
        };
        paths.push(ScaffoldPath {
            id: id.to_string(),
            nodes: parse_path(rest)?
        });
    }
    info!("Read {} paths", paths.len());
    Ok(paths)
}

/// Extracts the deduplicated, ordered gap constraints from the scaffold paths.
/// Paths of length <= 2 hold no internal gap; a gap only registers when both of its
/// neighbors are concrete contigs.
pub fn collect_constraints(paths: &[ScaffoldPath]) -> Vec<GapConstraint> {
    let mut constraints: BTreeSet<GapConstraint> = BTreeSet::new();
    for path in paths.iter() {
        if path.nodes.len() <= 2 {
            continue;
        }
        for window in path.nodes.windows(3) {
            let (prev, node, next) = (window[0], window[1], window[2]);
            if let Some(length) = node.gap_length() {
                if !prev.is_gap() && !next.is_gap() {
                    constraints.insert(GapConstraint {
                        source: prev,
                        dest: next,
                        dist: length as i64
                    });
                }
            }
        }
    }
    constraints.into_iter().collect()
}
