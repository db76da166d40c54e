use std::fs;

use log::{debug, info};

use super::container::Artifact;
use super::write_output;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitstring::BitString;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::cli::HzOpts;
use crate::tools::freq_count::freqs;

/// Concatenate the code of every input symbol, in input order. A symbol the table doesn't
/// cover fails with MissingCode.
pub fn encode_bits(data: &[u8], table: &CodeTable) -> Result<BitString> {
    let mut bp = BitPacker::new(data.len());
    for &byte in data {
        let code = table.get(byte).ok_or(HuffError::MissingCode(byte))?;
        bp.out_bits(code);
    }
    Ok(bp.finish())
}

/// Count, build the tree and table, and encode. Empty input fails with EmptyInput.
pub fn encode(data: &[u8]) -> Result<Artifact> {
    let frequencies = freqs(data);
    info!(
        "Found {} distinct symbols in {} bytes.",
        frequencies.len(),
        data.len()
    );

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let table = CodeTable::from_tree(&tree);
    debug!(
        "Longest code is {} bits, expecting {} payload bits.",
        table.max_code_len(),
        table.weighted_length(&frequencies)
    );

    let payload = encode_bits(data, &table)?;
    info!(
        "Encoded {} bytes into {} bits ({} padding).",
        data.len(),
        payload.len(),
        payload.padding()
    );
    Ok(Artifact::new(table, payload, data.len() as u64))
}

/// Encode and serialize in one step.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    encode(data)?.serialize()
}

/// Compress the input file defined in opts <HzOpts>.
pub fn compress(opts: &HzOpts) -> Result<()> {
    let data = fs::read(&opts.file)?;
    info!("Read {} bytes from {}.", data.len(), opts.file);

    let artifact = compress_bytes(&data)?;
    if !data.is_empty() {
        info!(
            "Compressed {} bytes to {} bytes ({:.1}%).",
            data.len(),
            artifact.len(),
            artifact.len() as f64 * 100.0 / data.len() as f64
        );
    }
    write_output(opts, &artifact)
}
