use huffzip::{
    compress_bytes, decompress_bytes, encode, freqs, CodeTable, FreqTable, HuffError, HuffmanTree,
};
use proptest::prelude::*;

/// Smallest weighted code length over every set of code lengths that satisfies Kraft's
/// inequality. Any such set of lengths can be realised as a prefix code.
fn brute_force_optimum(weights: &[u64]) -> u64 {
    let n = weights.len();
    if n == 1 {
        return weights[0];
    }
    let max_len = n - 1;
    let mut best = u64::MAX;
    let mut lengths = vec![1_usize; n];
    loop {
        // Kraft sum scaled by 2^max_len
        let kraft: u64 = lengths.iter().map(|&l| 1_u64 << (max_len - l)).sum();
        if kraft <= 1_u64 << max_len {
            let cost = weights
                .iter()
                .zip(&lengths)
                .map(|(w, &l)| w * l as u64)
                .sum();
            best = best.min(cost);
        }
        // Next combination of lengths
        let mut i = 0;
        while i < n && lengths[i] == max_len {
            lengths[i] = 1;
            i += 1;
        }
        if i == n {
            return best;
        }
        lengths[i] += 1;
    }
}

proptest! {
    #[test]
    fn test_roundtrip(input in prop::collection::vec(any::<u8>(), 1..2000)) {
        let packed = compress_bytes(&input).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_small_alphabet(input in prop::collection::vec(0..3u8, 1..500)) {
        let packed = compress_bytes(&input).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), input);
    }

    #[test]
    fn test_prefix_free(input in prop::collection::vec(any::<u8>(), 1..1000)) {
        let artifact = encode(&input).unwrap();
        let codes: Vec<_> = artifact.table().iter().map(|(_, code)| code.clone()).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b), "{} prefixes {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_optimal(weights in prop::collection::vec(1..50u64, 2..=5)) {
        let mut f = FreqTable::new();
        for (sym, w) in weights.iter().enumerate() {
            f.insert(sym as u8, *w);
        }
        let table = CodeTable::from_tree(&HuffmanTree::from_frequencies(&f).unwrap());
        prop_assert_eq!(table.weighted_length(&f), brute_force_optimum(&weights));
    }

    #[test]
    fn test_bit_count_matches_weights(input in prop::collection::vec(any::<u8>(), 1..1000)) {
        let artifact = encode(&input).unwrap();
        prop_assert_eq!(artifact.bit_count(), artifact.table().weighted_length(&freqs(&input)));
    }

    #[test]
    fn test_truncation_detected(input in prop::collection::vec(any::<u8>(), 1..500)) {
        let packed = compress_bytes(&input).unwrap();
        let result = decompress_bytes(&packed[..packed.len() - 1]);
        prop_assert!(matches!(
            result,
            Err(HuffError::CorruptArtifact(_)) | Err(HuffError::DecodeFailure(_))
        ));
    }
}

#[test]
fn brute_force_reference_test() {
    // 3:1, 2:2, 1:2
    assert_eq!(brute_force_optimum(&[3, 2, 1]), 9);
    assert_eq!(brute_force_optimum(&[1, 1, 1, 1]), 8);
    assert_eq!(brute_force_optimum(&[5]), 5);
}
