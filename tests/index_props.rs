//! Property tests for the FM-index: rank structure consistency, BWT
//! invertibility, and search soundness/completeness against brute
//! force.

use franklin::{Base, FmIndex, PackedDna};
use proptest::prelude::*;

fn dna_sequences(max: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
        1..max,
    )
}

fn brute_count(text: &[u8], pattern: &[u8]) -> usize {
    if pattern.is_empty() || pattern.len() > text.len() {
        return 0;
    }
    text.windows(pattern.len()).filter(|w| w == &pattern).count()
}

fn to_codes(pattern: &[u8]) -> Vec<u8> {
    pattern
        .iter()
        .map(|&ch| Base::from_ascii(ch).unwrap().code())
        .collect()
}

proptest! {
    #[test]
    fn rank_is_monotone_and_unit_stepped(seq in dna_sequences(300)) {
        let text = PackedDna::from_ascii(&seq).unwrap();
        let index = FmIndex::build(&text).unwrap();

        for base in Base::ALL {
            let mut previous = 0;
            for pos in 0..=index.rows() {
                let rank = index.rank(base, pos);
                prop_assert!(rank >= previous, "rank must not decrease");
                prop_assert!(rank - previous <= 1, "rank must step by at most one");
                previous = rank;
            }
        }

        // Per-symbol totals plus the sentinel row cover every row.
        let total: usize = Base::ALL
            .into_iter()
            .map(|base| index.rank(base, index.rows()))
            .sum();
        prop_assert_eq!(total + 1, index.rows());
    }

    #[test]
    fn lf_walk_inverts_the_bwt(seq in dna_sequences(300)) {
        let text = PackedDna::from_ascii(&seq).unwrap();
        let index = FmIndex::build(&text).unwrap();

        // Reading the BWT symbol at each LF step from row 0 replays the
        // text back to front and lands on the sentinel row.
        let mut row = 0;
        let mut recovered = Vec::with_capacity(seq.len());
        for _ in 0..seq.len() {
            let base = index.bwt_base(row).expect("sentinel row only at the end");
            recovered.push(base.to_ascii());
            row = index.lf(row);
        }
        recovered.reverse();
        prop_assert_eq!(recovered, seq);
        prop_assert_eq!(row, index.sentinel_row());
        prop_assert_eq!(index.lf(index.sentinel_row()), 0);
    }

    #[test]
    fn sa_position_is_a_permutation(seq in dna_sequences(300)) {
        let text = PackedDna::from_ascii(&seq).unwrap();
        let index = FmIndex::build(&text).unwrap();

        let mut seen = vec![false; index.rows()];
        for row in 0..index.rows() {
            let pos = index.sa_position(row).unwrap();
            prop_assert!(!seen[pos], "offset {} recovered twice", pos);
            seen[pos] = true;
        }
        // Row 0 is the sentinel suffix.
        prop_assert_eq!(index.sa_position(0).unwrap(), seq.len());
    }

    #[test]
    fn search_agrees_with_brute_force(
        seq in dna_sequences(200),
        starts in proptest::collection::vec(0usize..200, 1..8),
        len in 1usize..10,
    ) {
        let text = PackedDna::from_ascii(&seq).unwrap();
        let index = FmIndex::build(&text).unwrap();

        for &start in &starts {
            // Patterns sampled from the text itself always occur;
            // clip to stay in bounds.
            let start = start % seq.len();
            let end = (start + len).min(seq.len());
            let pattern = &seq[start..end];
            let codes = to_codes(pattern);

            let expected = brute_count(&seq, pattern);
            prop_assert!(expected >= 1);
            prop_assert_eq!(index.count(&codes).unwrap(), expected);

            let offset = index.locate(&codes).unwrap().expect("pattern occurs");
            prop_assert_eq!(&seq[offset..offset + pattern.len()], pattern);

            let rows = index.search(&codes).unwrap();
            prop_assert_eq!(rows.len(), expected);
            // Every row in the interval maps to a genuine occurrence.
            for row in rows {
                let pos = index.sa_position(row).unwrap();
                prop_assert_eq!(&seq[pos..pos + pattern.len()], pattern);
            }
        }
    }

    #[test]
    fn absent_patterns_count_zero(seq in dna_sequences(200), pattern in dna_sequences(6)) {
        let text = PackedDna::from_ascii(&seq).unwrap();
        let index = FmIndex::build(&text).unwrap();
        let codes = to_codes(&pattern);

        let expected = brute_count(&seq, &pattern);
        prop_assert_eq!(index.count(&codes).unwrap(), expected);
        if expected == 0 {
            prop_assert_eq!(index.locate(&codes).unwrap(), None);
        }
    }

    #[test]
    fn mms_is_bounded_and_consistent(seq in dna_sequences(200), pattern in dna_sequences(12)) {
        let text = PackedDna::from_ascii(&seq).unwrap();
        let index = FmIndex::build(&text).unwrap();
        let codes = to_codes(&pattern);

        let result = index.mms(&codes).unwrap();
        prop_assert!(result.matched <= pattern.len());

        // The matched suffix really occurs as often as the interval is
        // wide.
        if result.matched > 0 && !result.rows.is_empty() {
            let suffix = &pattern[pattern.len() - result.matched..];
            prop_assert_eq!(brute_count(&seq, suffix), result.rows.len());
        }
    }
}
