//! Suffix array construction by induced sorting (SACA-K).
//!
//! The construction runs in linear time and, beyond the output buffer
//! itself, constant extra space. Each recursion level classifies
//! positions as L- or S-type, bucket-sorts the LMS-substrings with two
//! induction passes, names them, and — when names collide — recurses on
//! the reduced sequence of names (at most half the length) before
//! inducing the full suffix order from the solved sub-problem.
//!
//! Level 0 reads the 2-bit packed text and keeps its four bucket
//! pointers in a small stack array. Deeper levels work on plain integer
//! sequences and store bucket counters *inside* the output buffer,
//! tagging slots by value range: [`EMPTY`] marks an unwritten slot, a
//! small negative value is an in-progress counter for a same-symbol run,
//! and anything non-negative is a suffix position. The recursion's
//! workspace geometry keeps the reduced text in the tail of the parent
//! region, immediately past the child's workspace, so region handoff is
//! a `split_at_mut` and the levels can never alias.

mod level0;
mod level1;
mod reduce;

use std::collections::TryReserveError;

use thiserror::Error;
use tracing::debug;

use crate::sequence::PackedDna;
use reduce::{IntText, PackedText};

/// Marker for an unoccupied workspace slot at recursion level >= 1: the
/// most-significant-bit pattern, distinguishable from both positions
/// (non-negative) and in-progress bucket counters (small negatives).
pub(crate) const EMPTY: i64 = i64::MIN;

/// Errors surfaced by suffix array construction.
#[derive(Debug, Error)]
pub enum SuffixArrayError {
    /// The input sequence held no bases.
    #[error("sequence must be non-empty")]
    EmptySequence,

    /// The workspace buffer could not be allocated.
    #[error("failed to reserve suffix-array workspace: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Build the suffix array of `text` with a virtual sentinel appended.
///
/// The result has `text.len() + 1` entries; entry 0 is always the
/// sentinel position `text.len()`, and the suffix starting at `sa[i]`
/// lexicographically precedes the suffix starting at `sa[i + 1]`.
pub fn suffix_array(text: &PackedDna) -> Result<Vec<usize>, SuffixArrayError> {
    let sa = workspace(text)?;
    Ok(sa.into_iter().map(|pos| pos as usize).collect())
}

/// Run the construction in a freshly reserved workspace, returning the
/// raw buffer (all entries non-negative once construction finishes).
pub(crate) fn workspace(text: &PackedDna) -> Result<Vec<i64>, SuffixArrayError> {
    if text.is_empty() {
        return Err(SuffixArrayError::EmptySequence);
    }
    let n = text.len() + 1;
    let mut sa = Vec::new();
    sa.try_reserve_exact(n)?;
    sa.resize(n, 0);
    solve_packed(text, &mut sa);
    Ok(sa)
}

/// Top-level solver over the packed 2-bit alphabet.
fn solve_packed(text: &PackedDna, sa: &mut [i64]) {
    let n = text.len() + 1;
    let mut bkt = [0usize; level0::ALPHABET];

    // Stage 1: sort the LMS-substrings, reducing the problem by >= 1/2.
    level0::put_substrings(sa, text, &mut bkt);
    level0::induce_l(sa, text, &mut bkt, false);
    level0::induce_s(sa, text, &mut bkt, false);

    // The sorted LMS-substrings now sit sparsely in the workspace;
    // compact them into the first n1 slots.
    let mut n1 = 0;
    for i in 0..n {
        if sa[i] > 0 {
            sa[n1] = sa[i];
            n1 += 1;
        }
    }

    let view = PackedText(text);
    let names = reduce::name_substrings(sa, &view, n1);
    debug!(n, n1, names, "reduced packed sequence");

    // Stage 2: solve the reduced problem.
    if names < n1 {
        solve_int(sa, n1, 1);
    } else {
        // Names are unique: the reduced order can be read off directly.
        for i in 0..n1 {
            let row = sa[n - n1 + i] as usize;
            sa[row] = i as i64;
        }
    }

    // Stage 3: induce the full order from the sorted LMS suffixes.
    reduce::seed_lms(sa, &view, n1, 0);
    level0::put_suffixes(sa, text, &mut bkt, n1);
    level0::induce_l(sa, text, &mut bkt, true);
    level0::induce_s(sa, text, &mut bkt, true);
}

/// Solver for recursion levels >= 1.
///
/// `region` is the parent's workspace: its last `n` slots hold this
/// level's text (the renamed reduced sequence, each symbol equal to the
/// tail index of its bucket) and the rest is this level's workspace.
fn solve_int(region: &mut [i64], n: usize, level: u32) {
    let m = region.len() - n;
    debug_assert!(m >= n, "workspace must cover the sub-problem");
    let (work, text) = region.split_at_mut(m);
    let text: &[i64] = text;

    // Stage 1 on the integer alphabet, bucket counters held in-place.
    level1::put_substrings(&mut work[..n], text);
    level1::induce_l(&mut work[..n], text, false);
    level1::induce_s(&mut work[..n], text, false);

    let mut n1 = 0;
    for i in 0..n {
        if work[i] > 0 {
            work[n1] = work[i];
            n1 += 1;
        }
    }

    let view = IntText(text);
    let names = reduce::name_substrings(work, &view, n1);
    debug!(level, n, n1, names, "reduced integer sequence");

    if names < n1 {
        solve_int(work, n1, level + 1);
    } else {
        for i in 0..n1 {
            let row = work[m - n1 + i] as usize;
            work[row] = i as i64;
        }
    }

    reduce::seed_lms(work, &view, n1, level);
    level1::put_suffixes(&mut work[..n], text, n1);
    level1::induce_l(&mut work[..n], text, true);
    level1::induce_s(&mut work[..n], text, true);
}
