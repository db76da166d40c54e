use std::collections::BTreeMap;

use huffzip::{
    compress_bytes, decode, decode_bits, decompress_bytes, encode, encode_bits, freqs, Artifact,
    BitString, CodeTable, HuffError, HuffmanTree,
};

#[test]
fn aaabbc_scenario() {
    let f = freqs(b"aaabbc");
    assert_eq!(f.into_iter().collect::<Vec<_>>(), vec![(b'a', 3), (b'b', 2), (b'c', 1)]);

    let artifact = encode(b"aaabbc").unwrap();
    let table = artifact.table();
    assert_eq!(table.get(b'a').unwrap().len(), 1);
    assert_eq!(table.get(b'b').unwrap().len(), 2);
    assert_eq!(table.get(b'c').unwrap().len(), 2);
    assert_eq!(artifact.bit_count(), 9);

    let bytes = artifact.serialize().unwrap();
    let back = Artifact::deserialize(&bytes).unwrap();
    assert_eq!(decode(&back).unwrap(), b"aaabbc");
}

#[test]
fn single_symbol_repeated() {
    for n in [1_usize, 2, 7, 8, 9, 1000] {
        let input = vec![b'q'; n];
        let artifact = encode(&input).unwrap();
        assert_eq!(artifact.bit_count(), n as u64);
        let packed = artifact.serialize().unwrap();
        assert_eq!(decompress_bytes(&packed).unwrap(), input);
    }
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(compress_bytes(&[]), Err(HuffError::EmptyInput)));
}

#[test]
fn every_byte_value() {
    let input: Vec<u8> = (0..=255_u8).cycle().take(5000).collect();
    let packed = compress_bytes(&input).unwrap();
    assert_eq!(decompress_bytes(&packed).unwrap(), input);
}

#[test]
fn large_input_uses_parallel_count() {
    let text = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
    let input: Vec<u8> = text.iter().copied().cycle().take(300_000).collect();
    let packed = compress_bytes(&input).unwrap();
    assert!(packed.len() < input.len());
    assert_eq!(decompress_bytes(&packed).unwrap(), input);
}

#[test]
fn skewed_distribution_long_codes() {
    // Fibonacci-like weights give a maximally deep tree
    let mut input = Vec::new();
    let (mut a, mut b) = (1_usize, 1_usize);
    for sym in 0..20_u8 {
        input.extend(std::iter::repeat(sym).take(a));
        let next = a + b;
        a = b;
        b = next;
    }
    let artifact = encode(&input).unwrap();
    assert_eq!(artifact.table().max_code_len(), 19);
    let packed = artifact.serialize().unwrap();
    assert_eq!(decompress_bytes(&packed).unwrap(), input);
}

#[test]
fn table_from_another_input_misses_symbols() {
    let table = CodeTable::from_tree(&HuffmanTree::from_bytes(b"abc").unwrap());
    assert!(matches!(
        encode_bits(b"abcd", &table),
        Err(HuffError::MissingCode(b'd'))
    ));
}

#[test]
fn external_table_round_trip() {
    let mut codes: BTreeMap<u8, BitString> = BTreeMap::new();
    codes.insert(b'\n', "00".parse().unwrap());
    codes.insert(b'"', "01".parse().unwrap());
    codes.insert(b' ', "1".parse().unwrap());
    let table = CodeTable::from_codes(codes).unwrap();
    let input = b"\" \n \"".to_vec();
    let bits = encode_bits(&input, &table).unwrap();
    assert_eq!(decode_bits(&bits, &table).unwrap(), input);
}

#[test]
fn corrupt_payload_byte() {
    let input = b"abracadabra, abracadabra!".to_vec();
    let mut packed = compress_bytes(&input).unwrap();
    let last = packed.len() - 1;
    packed.truncate(last);
    assert!(decompress_bytes(&packed).is_err());
}
