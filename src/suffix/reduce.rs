//! Problem reduction: naming sorted LMS-substrings and expanding the
//! solved reduced order back into LMS-suffix seeds.
//!
//! The routines here are shared by every recursion level through a tiny
//! text view: level 0 decodes the packed 2-bit sequence (with the
//! sentinel slot reading as 0), deeper levels read the integer reduced
//! sequence directly.

use super::EMPTY;
use crate::sequence::PackedDna;

/// Read access to the sentinel-terminated text of the current level.
pub(crate) trait Text {
    /// Length including the virtual sentinel.
    fn len(&self) -> usize;
    /// Symbol at `idx`; the sentinel slot compares as 0, the overall
    /// minimum, and ties are broken positionally by the naming scan.
    fn at(&self, idx: usize) -> i64;
}

/// Level-0 view over the packed alphabet.
pub(crate) struct PackedText<'a>(pub &'a PackedDna);

impl Text for PackedText<'_> {
    fn len(&self) -> usize {
        self.0.len() + 1
    }

    #[inline]
    fn at(&self, idx: usize) -> i64 {
        self.0.code(idx) as i64
    }
}

/// Level >= 1 view over the renamed integer sequence.
pub(crate) struct IntText<'a>(pub &'a [i64]);

impl Text for IntText<'_> {
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn at(&self, idx: usize) -> i64 {
        self.0[idx]
    }
}

/// Length of the LMS-substring starting at `x` (from `x` through the
/// next LMS position inclusive; the sentinel's substring has length 1).
fn lms_length<T: Text>(text: &T, x: usize) -> usize {
    let n = text.len();
    if x == n - 1 {
        return 1;
    }

    // Walk past the opening S-run, then track the last descent of the
    // closing L-run: the next LMS position is one past it.
    let mut i = 1;
    let mut dist = 0;
    while text.at(x + i) >= text.at(x + i - 1) {
        i += 1;
    }
    loop {
        if x + i > n - 1 || text.at(x + i) > text.at(x + i - 1) {
            break;
        }
        if x + i == n - 1 || text.at(x + i) < text.at(x + i - 1) {
            dist = i;
        }
        i += 1;
    }

    dist + 1
}

/// Name the sorted LMS-substrings in `sa[..n1]`, assemble the reduced
/// sequence in the tail `sa[m - n1..]`, and return the distinct-name
/// count. Two substrings share a name iff they match symbol for symbol
/// at equal length; names preserve substring order. The reduced
/// sequence comes out renamed so each symbol is its bucket boundary,
/// ready for the level >= 1 solver.
pub(crate) fn name_substrings<T: Text>(sa: &mut [i64], text: &T, n1: usize) -> usize {
    let n = text.len();
    let m = sa.len();

    sa[n1..n].fill(EMPTY);

    let mut names = 0;
    let mut name = 0;
    let mut pre_pos = 0;
    let mut pre_len = 0;
    for i in 0..n1 {
        let pos = sa[i] as usize;
        let len = lms_length(text, pos);

        let mut diff = len != pre_len;
        if !diff {
            for d in 0..len {
                if pos + d == n - 1 || pre_pos + d == n - 1 || text.at(pos + d) != text.at(pre_pos + d)
                {
                    diff = true;
                    break;
                }
            }
        }

        if diff {
            name = i;
            names += 1;
            sa[name] = 1; // occurrence count of the new name
            pre_pos = pos;
            pre_len = len;
        } else {
            sa[name] += 1;
        }

        // Interim name, stored sparsely: LMS positions are >= 2 apart.
        sa[n1 + pos / 2] = name as i64;
    }

    // Compact the sparse interim names into the tail of the workspace.
    let mut j = m - 1;
    for i in (n1..n).rev() {
        if sa[i] != EMPTY {
            sa[j] = sa[i];
            j -= 1;
        }
    }

    // Rename S-type symbols from bucket head to bucket tail using the
    // occurrence counts accumulated above.
    let mut succ_s = true;
    for i in (1..n1).rev() {
        let ch = sa[m - n1 + i];
        let ch1 = sa[m - n1 + i - 1];
        let cur_s = ch1 < ch || (ch1 == ch && succ_s);
        if cur_s {
            let count = sa[sa[m - n1 + i - 1] as usize];
            sa[m - n1 + i - 1] += count - 1;
        }
        succ_s = cur_s;
    }

    names
}

/// Replace the solved reduced order in `sa[..n1]` with the LMS text
/// positions it stands for, and reset the rest of the level's slots for
/// the final induction.
pub(crate) fn seed_lms<T: Text>(sa: &mut [i64], text: &T, n1: usize, level: u32) {
    let n = text.len();
    let m = sa.len();

    // Rebuild the LMS position list, right to left, in the tail.
    let mut j = n1 - 1;
    sa[m - n1 + j] = (n - 1) as i64;
    j = j.wrapping_sub(1);

    let mut succ_s = false; // text[n - 2] is L-type
    for i in (1..=n - 2).rev() {
        let cur_s =
            text.at(i - 1) < text.at(i) || (text.at(i - 1) == text.at(i) && succ_s);
        if !cur_s && succ_s {
            sa[m - n1 + j] = i as i64;
            j = j.wrapping_sub(1);
        }
        succ_s = cur_s;
    }

    for i in 0..n1 {
        let rank = sa[i] as usize;
        sa[i] = sa[m - n1 + rank];
    }

    let fill = if level == 0 { 0 } else { EMPTY };
    sa[n1..n].fill(fill);
}
