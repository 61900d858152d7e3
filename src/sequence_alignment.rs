
/*!
Basic pair-wise global alignment utilities.
The aligner is a plain Needleman-Wunsch over byte sequences; besides the match count it
produces a per-column consensus, with substitutions collapsed to IUPAC ambiguity codes.

# Example usage
```rust
use gap_con::sequence_alignment::align_global;

let alignment = align_global(b"ACGT", b"ACGA");
assert_eq!(alignment.matches(), 3);
assert_eq!(alignment.length(), 4);
// T/A disagreement becomes the ambiguity code W
assert_eq!(alignment.consensus(), b"ACGW");
```
*/

use crate::path_merge::WILDCARD;

const MATCH_SCORE: i32 = 1;
const MISMATCH_SCORE: i32 = -1;
const GAP_SCORE: i32 = -2;

/// A finished global alignment of two sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalAlignment {
    /// Per-column consensus of the two aligned sequences
    consensus: Vec<u8>,
    /// Number of columns where both bases agree
    matches: usize,
    /// Total number of alignment columns
    length: usize
}

impl GlobalAlignment {
    pub fn consensus(&self) -> &[u8] {
        &self.consensus
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Match fraction over the alignment length.
    pub fn identity(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.matches as f64 / self.length as f64
        }
    }
}

/// Globally aligns two sequences with Needleman-Wunsch.
/// # Arguments
/// * `a` - the first sequence
/// * `b` - the second sequence
pub fn align_global(a: &[u8], b: &[u8]) -> GlobalAlignment {
    let (la, lb) = (a.len(), b.len());

    // score matrix with linear gap costs
    let mut score = vec![vec![0i32; lb + 1]; la + 1];
    for (i, row) in score.iter_mut().enumerate() {
        row[0] = GAP_SCORE * i as i32;
    }
    for j in 0..=lb {
        score[0][j] = GAP_SCORE * j as i32;
    }
    for i in 1..=la {
        for j in 1..=lb {
            let diagonal = score[i - 1][j - 1] + pair_score(a[i - 1], b[j - 1]);
            let up = score[i - 1][j] + GAP_SCORE;
            let left = score[i][j - 1] + GAP_SCORE;
            score[i][j] = diagonal.max(up).max(left);
        }
    }

    // traceback, preferring the diagonal
    let mut consensus: Vec<u8> = vec![];
    let mut matches = 0;
    let mut length = 0;
    let (mut i, mut j) = (la, lb);
    while i > 0 || j > 0 {
        length += 1;
        if i > 0 && j > 0 && score[i][j] == score[i - 1][j - 1] + pair_score(a[i - 1], b[j - 1]) {
            let (ca, cb) = (a[i - 1], b[j - 1]);
            if ca.eq_ignore_ascii_case(&cb) {
                matches += 1;
            }
            consensus.push(column_consensus(ca, cb));
            i -= 1;
            j -= 1;
        } else if i > 0 && score[i][j] == score[i - 1][j] + GAP_SCORE {
            consensus.push(a[i - 1]);
            i -= 1;
        } else {
            consensus.push(b[j - 1]);
            j -= 1;
        }
    }
    consensus.reverse();

    GlobalAlignment {
        consensus,
        matches,
        length
    }
}

fn pair_score(a: u8, b: u8) -> i32 {
    if a.eq_ignore_ascii_case(&b) {
        MATCH_SCORE
    } else {
        MISMATCH_SCORE
    }
}

/// Consensus of one aligned column: equal bases pass through, a wildcard loses to the
/// concrete base, and two differing bases collapse to their IUPAC ambiguity code.
/// The column is lower-case whenever either input base was lower-case.
fn column_consensus(a: u8, b: u8) -> u8 {
    let mask = a.is_ascii_lowercase() || b.is_ascii_lowercase();
    let (ua, ub) = (a.to_ascii_uppercase(), b.to_ascii_uppercase());
    let consensus = if ua == ub {
        ua
    } else if ua == WILDCARD {
        ub
    } else if ub == WILDCARD {
        ua
    } else {
        ambiguity_or(ua, ub)
    };
    if mask { consensus.to_ascii_lowercase() } else { consensus }
}

/// IUPAC codes indexed by their A/C/G/T bitmask.
const IUPAC_BY_MASK: &[u8; 16] = b"NACMGRSVTWYHKDBN";

fn iupac_mask(base: u8) -> u8 {
    match base {
        b'A' => 0b0001,
        b'C' => 0b0010,
        b'M' => 0b0011,
        b'G' => 0b0100,
        b'R' => 0b0101,
        b'S' => 0b0110,
        b'V' => 0b0111,
        b'T' => 0b1000,
        b'W' => 0b1001,
        b'Y' => 0b1010,
        b'H' => 0b1011,
        b'K' => 0b1100,
        b'D' => 0b1101,
        b'B' => 0b1110,
        _ => 0b1111
    }
}

/// Returns the IUPAC code covering both input codes.
fn ambiguity_or(a: u8, b: u8) -> u8 {
    IUPAC_BY_MASK[(iupac_mask(a) | iupac_mask(b)) as usize]
}
