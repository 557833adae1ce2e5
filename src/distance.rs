//! Distance engine.
//!
//! Computes three pairwise distance matrices — Jaccard, Dice, and
//! Jukes–Cantor-corrected Hamming — from sorted genome signatures, via a
//! merge walk over the two sorted core arrays.

use rayon::prelude::*;

use crate::types::{SignatureType, SimpleCore};

/// A finalized per-genome signature: sorted (and, in SET mode,
/// deduplicated) cores plus the two scalars the distance formulas need.
#[derive(Debug, Clone)]
pub struct Signature {
    pub cores: Vec<SimpleCore>,
    pub total_len: f64,
    pub kind: SignatureType,
}

/// The three distance matrices produced by [`pairwise_distances`], each
/// symmetric with a zero diagonal.
pub struct DistanceMatrices {
    pub jaccard: Vec<Vec<f64>>,
    pub dice: Vec<Vec<f64>>,
    pub jc: Vec<Vec<f64>>,
}

/// Intersection and union sizes between two sorted signatures, via a
/// two-cursor merge walk. In VECTOR mode every occurrence counts and an
/// `*a < *b` step advances `a` exactly once — no extra skip — which is
/// the multiset merge-union convention this crate follows (this
/// deliberately differs from a double-advance found in some reference
/// merge-union implementations).
fn merge_walk(a: &[SimpleCore], b: &[SimpleCore], kind: SignatureType) -> (u64, u64) {
    let mut i = 0;
    let mut j = 0;
    let mut intersection: u64 = 0;
    let mut union: u64 = 0;

    while i < a.len() && j < b.len() {
        union += 1;
        if a[i] == b[j] {
            intersection += 1;
            let matched = a[i];
            i += 1;
            j += 1;
            if kind == SignatureType::Set {
                while i < a.len() && a[i] == matched {
                    i += 1;
                }
                while j < b.len() && b[j] == matched {
                    j += 1;
                }
            }
        } else if a[i] < b[j] {
            let skipped = a[i];
            i += 1;
            if kind == SignatureType::Set {
                while i < a.len() && a[i] == skipped {
                    i += 1;
                }
            }
        } else {
            let skipped = b[j];
            j += 1;
            if kind == SignatureType::Set {
                while j < b.len() && b[j] == skipped {
                    j += 1;
                }
            }
        }
    }

    union += tail_contribution(&a[i..], kind);
    union += tail_contribution(&b[j..], kind);

    (intersection, union)
}

/// The remaining-tail contribution to `union`: every element in VECTOR
/// mode, one per distinct run in SET mode.
fn tail_contribution(tail: &[SimpleCore], kind: SignatureType) -> u64 {
    match kind {
        SignatureType::Vector => tail.len() as u64,
        SignatureType::Set => {
            let mut count = 0u64;
            let mut k = 0;
            while k < tail.len() {
                count += 1;
                let value = tail[k];
                k += 1;
                while k < tail.len() && tail[k] == value {
                    k += 1;
                }
            }
            count
        }
    }
}

/// Jaccard, Dice, and Jukes–Cantor distances for one pair, from merge
/// walk outputs plus the two signatures' sizes and `total_len`.
/// Undefined operations (division/log of a non-positive value) yield
/// `NaN` rather than panicking.
fn distances_from_counts(
    intersection: u64,
    union: u64,
    len_a: usize,
    len_b: usize,
    total_len_a: f64,
    total_len_b: f64,
) -> (f64, f64, f64) {
    let i = intersection as f64;
    let u = union as f64;
    let len_a = len_a as f64;
    let len_b = len_b as f64;

    let jaccard = 1.0 - i / u;

    let dice_sim = 2.0 * i / (len_a + len_b);
    let dice = 1.0 - dice_sim;

    let avg_len = (total_len_a + total_len_b) / (len_a + len_b);
    let hamming = 1.0 - dice_sim.powf(1.0 / avg_len);
    let jc = -(3.0 / 4.0) * (1.0 - (3.0 / 4.0) * hamming).ln();

    (jaccard, dice, jc)
}

/// Compute all three pairwise distance matrices over `signatures`,
/// parallelized over the upper-triangular pair list with rayon.
pub fn pairwise_distances(signatures: &[Signature]) -> DistanceMatrices {
    let n = signatures.len();
    let mut jaccard = vec![vec![0.0; n]; n];
    let mut dice = vec![vec![0.0; n]; n];
    let mut jc = vec![vec![0.0; n]; n];

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let results: Vec<(usize, usize, f64, f64, f64)> = pairs
        .into_par_iter()
        .map(|(i, j)| {
            let sig_a = &signatures[i];
            let sig_b = &signatures[j];
            let (intersection, union) = merge_walk(&sig_a.cores, &sig_b.cores, sig_a.kind);
            let (d_jaccard, d_dice, d_jc) = distances_from_counts(
                intersection,
                union,
                sig_a.cores.len(),
                sig_b.cores.len(),
                sig_a.total_len,
                sig_b.total_len,
            );
            (i, j, d_jaccard, d_dice, d_jc)
        })
        .collect();

    for (i, j, d_jaccard, d_dice, d_jc) in results {
        jaccard[i][j] = d_jaccard;
        jaccard[j][i] = d_jaccard;
        dice[i][j] = d_dice;
        dice[j][i] = d_dice;
        jc[i][j] = d_jc;
        jc[j][i] = d_jc;
    }

    DistanceMatrices { jaccard, dice, jc }
}
