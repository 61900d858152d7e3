
/*!
This module provides the oriented contig node type used throughout the crate.
A node is either a concrete contig with an orientation, or a marker for an ambiguous gap of estimated length.

# Example usage
```rust
use gap_con::contig_node::{ContigNode, Orientation};

let node: ContigNode = "12-".parse().unwrap();
assert_eq!(node, ContigNode::contig(12, Orientation::Reverse));
assert_eq!(node.complement().to_string(), "12+");

let gap: ContigNode = "8N".parse().unwrap();
assert_eq!(gap, ContigNode::gap(8));
```
*/

use itertools::Itertools;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// The strand a contig is read from.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Orientation {
    /// The contig sequence as stored
    #[default]
    Forward,
    /// The reverse complement of the stored sequence
    Reverse
}

impl Orientation {
    /// Returns the opposite orientation.
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward
        }
    }

    /// Returns the single-character strand symbol, '+' or '-'.
    pub fn symbol(self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-'
        }
    }
}

/// One element of a scaffold or candidate path.
/// Ambiguous gaps carry their estimated length explicitly instead of overloading the contig id.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ContigNode {
    /// A concrete contig with an orientation
    Contig {
        /// Numeric contig identifier
        id: u32,
        /// Strand the sequence is read from
        orientation: Orientation
    },
    /// An ambiguous gap marker with an estimated length in bases
    Gap {
        /// Estimated number of unknown bases
        length: usize
    }
}

impl ContigNode {
    /// Constructor for a concrete contig node.
    pub fn contig(id: u32, orientation: Orientation) -> ContigNode {
        ContigNode::Contig { id, orientation }
    }

    /// Shorthand constructor for a forward-strand contig node.
    pub fn forward(id: u32) -> ContigNode {
        ContigNode::contig(id, Orientation::Forward)
    }

    /// Shorthand constructor for a reverse-strand contig node.
    pub fn reverse(id: u32) -> ContigNode {
        ContigNode::contig(id, Orientation::Reverse)
    }

    /// Constructor for an ambiguous gap marker.
    pub fn gap(length: usize) -> ContigNode {
        ContigNode::Gap { length }
    }

    /// Returns the same node on the opposite strand. Gap markers are unchanged.
    pub fn complement(self) -> ContigNode {
        match self {
            ContigNode::Contig { id, orientation } => ContigNode::Contig { id, orientation: orientation.flipped() },
            gap => gap
        }
    }

    /// Returns true if this node is an ambiguous gap marker.
    pub fn is_gap(&self) -> bool {
        matches!(self, ContigNode::Gap { .. })
    }

    /// Returns the contig id for concrete nodes.
    pub fn contig_id(&self) -> Option<u32> {
        match self {
            ContigNode::Contig { id, .. } => Some(*id),
            ContigNode::Gap { .. } => None
        }
    }

    /// Returns the estimated length for gap markers.
    pub fn gap_length(&self) -> Option<usize> {
        match self {
            ContigNode::Contig { .. } => None,
            ContigNode::Gap { length } => Some(*length)
        }
    }
}

impl fmt::Display for ContigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContigNode::Contig { id, orientation } => write!(f, "{}{}", id, orientation.symbol()),
            ContigNode::Gap { length } => write!(f, "{length}N")
        }
    }
}

impl FromStr for ContigNode {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<ContigNode, SimpleError> {
        let (head, tail) = match s.len() {
            0 => bail!("empty contig node token"),
            l => s.split_at(l - 1)
        };
        match tail {
            "+" => Ok(ContigNode::forward(parse_number(head, s)?)),
            "-" => Ok(ContigNode::reverse(parse_number(head, s)?)),
            "N" => Ok(ContigNode::gap(parse_number(head, s)? as usize)),
            _ => bail!("contig node token `{}' must end with '+', '-', or 'N'", s)
        }
    }
}

fn parse_number(head: &str, token: &str) -> Result<u32, SimpleError> {
    match head.parse::<u32>() {
        Ok(v) => Ok(v),
        Err(_) => bail!("invalid contig node token `{}'", token)
    }
}

/// An ordered, oriented chain of contig nodes.
pub type ContigPath = Vec<ContigNode>;

/// Formats a path as whitespace-joined node tokens.
pub fn format_path(path: &[ContigNode]) -> String {
    path.iter().join(" ")
}

/// Parses a whitespace-separated list of node tokens.
pub fn parse_path(s: &str) -> Result<ContigPath, SimpleError> {
    s.split_whitespace()
        .map(|token| token.parse::<ContigNode>())
        .collect()
}
