//! Oracle tests: the SACA-K construction must agree with brute-force
//! suffix sorting on every input, including the repeat-heavy shapes
//! that force deep recursion through the in-place counter machinery.

use franklin::{suffix_array, PackedDna};
use proptest::prelude::*;

/// Brute-force reference: sort all suffixes of the sentinel-terminated
/// code sequence, sentinel smallest.
fn oracle(codes: &[u8]) -> Vec<usize> {
    let keyed: Vec<i16> = codes
        .iter()
        .map(|&c| c as i16)
        .chain(std::iter::once(-1))
        .collect();
    let mut order: Vec<usize> = (0..keyed.len()).collect();
    order.sort_by(|&a, &b| keyed[a..].cmp(&keyed[b..]));
    order
}

fn assert_matches_oracle(seq: &[u8]) {
    let text = PackedDna::from_ascii(seq).expect("test sequences pack cleanly");
    let codes: Vec<u8> = (0..text.len()).map(|i| text.code(i)).collect();
    let sa = suffix_array(&text).expect("construction succeeds");

    // Permutation property.
    let mut seen = vec![false; sa.len()];
    for &pos in &sa {
        assert!(!seen[pos], "position {pos} appears twice");
        seen[pos] = true;
    }

    // Sorted-order property, via the oracle.
    assert_eq!(sa, oracle(&codes), "order mismatch for {:?}", String::from_utf8_lossy(seq));
}

#[test]
fn tiny_sequences() {
    for seq in [&b"A"[..], b"T", b"AA", b"AT", b"TA", b"ACG", b"GGG"] {
        assert_matches_oracle(seq);
    }
}

#[test]
fn plain_sequences() {
    assert_matches_oracle(b"GATTACA");
    assert_matches_oracle(b"ACGTACGTACGTACGT");
    assert_matches_oracle(b"TTGACCATGCAACTGGATCC");
}

#[test]
fn adversarial_repeats_force_deep_recursion() {
    assert_matches_oracle(&b"A".repeat(500));
    assert_matches_oracle(&b"AT".repeat(300));
    assert_matches_oracle(&b"AAC".repeat(200));
    assert_matches_oracle(&b"ACGGACGG".repeat(80));
    assert_matches_oracle(&b"TTTGTTTTGTTTTTG".repeat(40));

    // Nested period structure: every level of the recursion still sees
    // repeated names.
    let unit = b"ACAACAACCACA".repeat(8);
    assert_matches_oracle(&unit.repeat(4));
}

#[test]
fn skewed_alphabets() {
    // Mostly one symbol with sparse interruptions.
    let mut seq = b"A".repeat(400);
    for i in (0..400).step_by(37) {
        seq[i] = b'C';
    }
    assert_matches_oracle(&seq);

    // Only the two extreme symbols.
    let mut seq = Vec::new();
    for i in 0..300 {
        seq.push(if i * i % 7 < 3 { b'A' } else { b'T' });
    }
    assert_matches_oracle(&seq);
}

proptest! {
    #[test]
    fn random_sequences_match_oracle(
        seq in proptest::collection::vec(
            prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
            1..2000,
        )
    ) {
        assert_matches_oracle(&seq);
    }

    #[test]
    fn random_two_symbol_sequences_match_oracle(
        seq in proptest::collection::vec(prop_oneof![Just(b'A'), Just(b'C')], 1..1500)
    ) {
        // Small alphabets collide names constantly, guaranteeing
        // recursion on almost every generated case.
        assert_matches_oracle(&seq);
    }
}
