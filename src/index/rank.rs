//! Two-level rank structure over a packed BWT.
//!
//! Coarse level: cumulative per-symbol counts at every 16-base block
//! boundary. Fine level: a compile-time table mapping each possible
//! packed byte to its four symbol counts, so the within-block
//! accumulation walks whole bytes; at most three bases at the very end
//! of a query prefix are counted individually.

use crate::sequence::PackedDna;

/// Bases covered by one coarse block.
pub(crate) const BLOCK_BASES: usize = 16;
/// Packed bytes per coarse block.
const BLOCK_BYTES: usize = BLOCK_BASES / 4;

/// `BYTE_COUNTS[4 * byte + code]` is the number of occurrences of
/// `code` among the four bases packed in `byte`.
static BYTE_COUNTS: [u8; 1024] = byte_counts();

const fn byte_counts() -> [u8; 1024] {
    let mut tbl = [0u8; 1024];
    let mut byte = 0;
    while byte < 256 {
        let mut slot = 0;
        while slot < 4 {
            let code = (byte >> (2 * (3 - slot))) & 3;
            tbl[4 * byte + code] += 1;
            slot += 1;
        }
        byte += 1;
    }
    tbl
}

/// Blocked rank index; `blocks[j]` holds the symbol counts of the
/// first `min(16 * j, len)` BWT bases, so the final entry is the
/// whole-sequence total.
#[derive(Debug, Clone)]
pub(crate) struct RankTable {
    blocks: Vec<[u64; 4]>,
}

impl RankTable {
    pub(crate) fn build(bwt: &PackedDna) -> Self {
        let len = bwt.len();
        let full_blocks = len / BLOCK_BASES;
        let bytes = bwt.bytes();

        let mut blocks = Vec::with_capacity(full_blocks + 2);
        let mut counts = [0u64; 4];
        blocks.push(counts);

        for block in 0..full_blocks {
            for b in 0..BLOCK_BYTES {
                accumulate(&mut counts, bytes[block * BLOCK_BYTES + b]);
            }
            blocks.push(counts);
        }

        if len % BLOCK_BASES != 0 {
            // Whole bytes of the tail block, then the <= 3 leftover
            // bases of a partial byte.
            for &byte in &bytes[full_blocks * BLOCK_BYTES..len / 4] {
                accumulate(&mut counts, byte);
            }
            for i in (len & !3)..len {
                counts[bwt.code(i) as usize] += 1;
            }
            blocks.push(counts);
        }

        Self { blocks }
    }

    /// Count of `code` in `bwt[..pos]`; `pos` must not exceed the BWT
    /// length.
    pub(crate) fn rank(&self, bwt: &PackedDna, code: u8, pos: usize) -> u64 {
        debug_assert!(pos <= bwt.len());
        let mut count = self.blocks[pos / BLOCK_BASES][code as usize];

        let bytes = bwt.bytes();
        for &byte in &bytes[(pos / BLOCK_BASES) * BLOCK_BYTES..pos / 4] {
            count += BYTE_COUNTS[4 * byte as usize + code as usize] as u64;
        }
        for i in (pos & !3)..pos {
            if bwt.code(i) == code {
                count += 1;
            }
        }

        count
    }

    /// Whole-sequence totals per symbol.
    pub(crate) fn totals(&self) -> [u64; 4] {
        *self.blocks.last().expect("rank table always has a boundary entry")
    }
}

fn accumulate(counts: &mut [u64; 4], byte: u8) {
    for code in 0..4 {
        counts[code] += BYTE_COUNTS[4 * byte as usize + code] as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_count_table_covers_every_byte() {
        for byte in 0..256usize {
            let mut expect = [0u8; 4];
            for slot in 0..4 {
                expect[(byte >> (2 * (3 - slot))) & 3] += 1;
            }
            for code in 0..4 {
                assert_eq!(BYTE_COUNTS[4 * byte + code], expect[code]);
            }
        }
    }

    #[test]
    fn rank_matches_naive_counting() {
        // Length 37 leaves both a partial block and a partial byte.
        let seq = b"ACGTTTACGGCATCATACGGGTACATCGTAACGTGCA";
        let bwt = PackedDna::from_ascii(seq).unwrap();
        let table = RankTable::build(&bwt);

        for pos in 0..=seq.len() {
            for code in 0..4u8 {
                let naive = (0..pos).filter(|&i| bwt.code(i) == code).count() as u64;
                assert_eq!(table.rank(&bwt, code, pos), naive, "code {code} at {pos}");
            }
        }
    }

    #[test]
    fn totals_sum_to_length() {
        let bwt = PackedDna::from_ascii(&b"GATTACA".repeat(9)).unwrap();
        let table = RankTable::build(&bwt);
        let totals = table.totals();
        assert_eq!(totals.iter().sum::<u64>(), bwt.len() as u64);
    }
}
