use std::fs;

use log::{error, info, trace};

use super::container::Artifact;
use super::write_output;
use crate::bitstream::bitstring::BitString;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::cli::{HzOpts, Mode};

/// Recover the symbols from a bit sequence and a prefix-free code table.
///
/// Bits are added to an accumulator one at a time. As soon as the accumulator equals a code, that
/// code's symbol is emitted and the accumulator is cleared. Because no code is a prefix of another,
/// the first match is the only possible match. Bits left over at the end, or an accumulator that
/// outgrows the longest code, fail with DecodeFailure.
pub fn decode_bits(bits: &BitString, table: &CodeTable) -> Result<Vec<u8>> {
    let inverse = table.inverse();
    let max_len = table.max_code_len();

    let mut out = Vec::with_capacity(bits.len() / max_len.max(1));
    let mut acc = BitString::with_capacity(max_len);

    for (i, bit) in bits.iter().enumerate() {
        acc.push(bit);
        if let Some(&sym) = inverse.get(&acc) {
            out.push(sym);
            acc.clear();
        } else if acc.len() >= max_len {
            error!("Bits {} ending at bit {} match no code.", acc, i);
            return Err(HuffError::DecodeFailure(format!(
                "bits {} ending at bit {} match no code",
                acc, i
            )));
        }
    }

    if !acc.is_empty() {
        error!("Stream ended inside a code: {} bits left over.", acc.len());
        return Err(HuffError::DecodeFailure(format!(
            "stream ended inside a code ({} bits left over)",
            acc.len()
        )));
    }
    trace!("Decoded {} symbols from {} bits.", out.len(), bits.len());
    Ok(out)
}

/// Decode an artifact, checking the symbol count against its header.
pub fn decode(artifact: &Artifact) -> Result<Vec<u8>> {
    let out = decode_bits(artifact.payload(), artifact.table())?;
    if out.len() as u64 != artifact.symbol_total() {
        return Err(HuffError::DecodeFailure(format!(
            "decoded {} symbols, header promised {}",
            out.len(),
            artifact.symbol_total()
        )));
    }
    Ok(out)
}

/// Deserialize and decode in one step.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decode(&Artifact::deserialize(data)?)
}

/// Decompress (or, in test mode, just verify) the file specified in opts (HzOpts).
pub fn decompress(opts: &HzOpts) -> Result<()> {
    let data = fs::read(&opts.file)?;

    let decoded = match decompress_bytes(&data) {
        Ok(decoded) => decoded,
        Err(e) => {
            error!("Fatal error: {} is not a valid huffzip file: {}", opts.file, e);
            return Err(e);
        }
    };
    info!(
        "Decompressed {} bytes to {} bytes.",
        data.len(),
        decoded.len()
    );

    if opts.op_mode == Mode::Test {
        info!("{}: ok", opts.file);
        return Ok(());
    }
    write_output(opts, &decoded)
}
