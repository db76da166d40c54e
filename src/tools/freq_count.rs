use std::collections::BTreeMap;

use rayon::prelude::*;

/// Symbol counts, ascending by symbol. Only symbols that occur are present.
pub type FreqTable = BTreeMap<u8, u64>;

const PARALLEL_THRESHOLD: usize = 64_000;
const CHUNK_SIZE: usize = 16_000;

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
pub fn freqs(data: &[u8]) -> FreqTable {
    let counts = if data.len() > PARALLEL_THRESHOLD {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(CHUNK_SIZE)
            .fold(
                || vec![0_u64; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u64; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u64>>(),
            )
    } else {
        let mut freqs = vec![0_u64; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    };

    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(sym, &count)| (sym as u8, count))
        .collect()
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn small_count_test() {
        let f = freqs(b"aaabbc");
        assert_eq!(f.len(), 3);
        assert_eq!(f[&b'a'], 3);
        assert_eq!(f[&b'b'], 2);
        assert_eq!(f[&b'c'], 1);
        assert!(!f.contains_key(&b'd'));
    }

    #[test]
    fn empty_test() {
        assert!(freqs(&[]).is_empty());
    }

    #[test]
    fn parallel_matches_sequential_test() {
        let data: Vec<u8> = (0..200_000_u32).map(|i| (i * 7 % 251) as u8).collect();
        let f = freqs(&data);
        let total: u64 = f.values().sum();
        assert_eq!(total, data.len() as u64);
        let expected = data.iter().filter(|&&b| b == 3).count() as u64;
        assert_eq!(f[&3], expected);
        // Byte values 251..=255 never appear
        assert_eq!(f.len(), 251);
    }
}
