//! Induction passes over the packed 2-bit alphabet (recursion level 0).
//!
//! The alphabet is small and fixed, so the bucket table is a four-entry
//! stack array recomputed before every pass: tail pointers for passes
//! that fill buckets back to front, head pointers for the forward L-type
//! induction. The virtual sentinel reads as code 0 from the packed
//! text's pad slot and is pinned to row 0 by hand.

use crate::sequence::PackedDna;

/// Real symbols at level 0.
pub(crate) const ALPHABET: usize = 4;

/// Recompute the bucket table: tail boundaries when `end` is set, head
/// boundaries otherwise. The sentinel slot counts toward bucket 0.
fn buckets(text: &PackedDna, bkt: &mut [usize; ALPHABET], end: bool) {
    let n = text.len() + 1;
    bkt.fill(0);
    for i in 0..n {
        bkt[text.code(i) as usize] += 1;
    }
    let mut sum = 0;
    for slot in bkt.iter_mut() {
        sum += *slot;
        *slot = if end { sum - 1 } else { sum - *slot };
    }
}

/// Drop each LMS-substring's first symbol at the tail of its bucket,
/// scanning right to left so same-bucket entries keep scan order.
pub(crate) fn put_substrings(sa: &mut [i64], text: &PackedDna, bkt: &mut [usize; ALPHABET]) {
    let n = text.len() + 1;
    buckets(text, bkt, true);

    sa[..n].fill(0);

    // text[n - 2] is L-type: its successor is the sentinel.
    let mut succ_s = false;
    for i in (1..=n - 2).rev() {
        let cur_s = text.code(i - 1) < text.code(i)
            || (text.code(i - 1) == text.code(i) && succ_s);
        if !cur_s && succ_s {
            let c = text.code(i) as usize;
            sa[bkt[c]] = i as i64;
            bkt[c] -= 1;
        }
        succ_s = cur_s;
    }

    // The sentinel is the single smallest LMS-substring.
    sa[0] = (n - 1) as i64;
}

/// Forward scan placing L-type suffixes at bucket heads. With `suffix`
/// unset this is the stage-1 approximation and non-L entries are
/// cleared behind the scan.
pub(crate) fn induce_l(sa: &mut [i64], text: &PackedDna, bkt: &mut [usize; ALPHABET], suffix: bool) {
    let n = text.len() + 1;
    buckets(text, bkt, false);

    bkt[0] += 1; // skip the virtual sentinel
    for i in 0..n {
        if sa[i] > 0 {
            let j = (sa[i] - 1) as usize;
            if text.code(j) >= text.code(j + 1) {
                let c = text.code(j) as usize;
                sa[bkt[c]] = j as i64;
                bkt[c] += 1;
                if !suffix && i > 0 {
                    sa[i] = 0;
                }
            }
        }
    }
}

/// Backward scan placing S-type suffixes at bucket tails.
pub(crate) fn induce_s(sa: &mut [i64], text: &PackedDna, bkt: &mut [usize; ALPHABET], suffix: bool) {
    let n = text.len() + 1;
    buckets(text, bkt, true);

    for i in (1..n).rev() {
        if sa[i] > 0 {
            let j = (sa[i] - 1) as usize;
            if text.code(j) <= text.code(j + 1) && bkt[text.code(j) as usize] < i {
                let c = text.code(j) as usize;
                sa[bkt[c]] = j as i64;
                bkt[c] -= 1;
                if !suffix {
                    sa[i] = 0;
                }
            }
        }
    }
}

/// Scatter the fully ordered LMS suffixes from the first `n1` slots to
/// their bucket tails, seeding the final induction.
pub(crate) fn put_suffixes(
    sa: &mut [i64],
    text: &PackedDna,
    bkt: &mut [usize; ALPHABET],
    n1: usize,
) {
    let n = text.len() + 1;
    buckets(text, bkt, true);

    for i in (1..n1).rev() {
        let j = sa[i];
        sa[i] = 0;
        let c = text.code(j as usize) as usize;
        sa[bkt[c]] = j;
        bkt[c] -= 1;
    }
    sa[0] = (n - 1) as i64;
}
