//! The container holds everything needed to decode an artifact without the original input.
//!
//! Layout (all integers big-endian):
//!
//! ```text
//! "HFZ" | version u8 | symbol count u16 | bit count u64 | symbol total u64
//! symbol count x [ symbol len u8 | symbol | code len u8 | code bits, zero padded ]
//! payload: ceil(bit count / 8) bytes, zero padded
//! ```
//!
//! Every variable-length field is length prefixed, so the table round trips any byte value,
//! including whitespace, quotes and control characters.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use log::{debug, error, trace};

use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitstring::BitString;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;

pub const MAGIC: &[u8; 3] = b"HFZ";
pub const VERSION: u8 = 1;
/// Symbols are single bytes.
const SYMBOL_LEN: u8 = 1;
const MAX_SYMBOLS: usize = 256;
/// Fixed header size: magic, version, symbol count, bit count, symbol total.
const HEADER_LEN: usize = 3 + 1 + 2 + 8 + 8;

/// A code table plus the packed payload it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    table: CodeTable,
    payload: BitString,
    symbol_total: u64,
}

impl Artifact {
    /// `symbol_total` is the number of symbols encoded in `payload`.
    pub fn new(table: CodeTable, payload: BitString, symbol_total: u64) -> Self {
        Self {
            table,
            payload,
            symbol_total,
        }
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn payload(&self) -> &BitString {
        &self.payload
    }

    /// Number of meaningful payload bits.
    pub fn bit_count(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn symbol_total(&self) -> u64 {
        self.symbol_total
    }

    /// Lay the artifact out as bytes.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let table_len: usize = self
            .table
            .iter()
            .map(|(_, code)| 3 + code.as_bytes().len())
            .sum();
        let mut bp = BitPacker::new(HEADER_LEN + table_len + self.payload.as_bytes().len());

        bp.out_bytes(MAGIC);
        bp.out8(VERSION);
        bp.out16(self.table.len() as u16);
        bp.out64(self.bit_count());
        bp.out64(self.symbol_total);

        trace!("Code table written at {}.", bp.loc());
        for (&sym, code) in self.table.iter() {
            let code_len = u8::try_from(code.len()).map_err(|_| {
                HuffError::InvalidCodeTable(format!(
                    "code for symbol {:#04x} is {} bits, the container holds at most 255",
                    sym,
                    code.len()
                ))
            })?;
            bp.out8(SYMBOL_LEN);
            bp.out8(sym);
            bp.out8(code_len);
            bp.out_bytes(code.as_bytes());
        }

        trace!("Payload written at {}.", bp.loc());
        bp.out_bytes(self.payload.as_bytes());
        bp.flush();
        debug!(
            "Serialized {} codes and {} payload bits into {} bytes.",
            self.table.len(),
            self.bit_count(),
            bp.output.len()
        );
        Ok(bp.output)
    }

    /// Serialize straight to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.serialize()?)?;
        Ok(())
    }

    /// Parse an artifact from bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        Self::read_from(data)
    }

    /// Parse an artifact from any reader. The reader must hold exactly one artifact.
    pub fn read_from<R: Read>(source: R) -> Result<Self> {
        let mut br = BitReader::new(source);

        // Look for a valid signature.
        let magic = need(br.bytes(MAGIC.len()), "signature")?;
        if magic != MAGIC {
            return Err(corrupt("not a huffzip artifact (bad signature)"));
        }
        let version = need(br.byte(), "version")?;
        if version != VERSION {
            return Err(corrupt(format!("unsupported version {}", version)));
        }

        let symbol_count = need(br.bint(16), "symbol count")? as usize;
        if !(1..=MAX_SYMBOLS).contains(&symbol_count) {
            return Err(corrupt(format!("invalid symbol count {}", symbol_count)));
        }
        let bit_count = need(br.bint(64), "bit count")?;
        let symbol_total = need(br.bint(64), "symbol total")?;
        // Every code is at least one bit long
        if symbol_total > bit_count {
            return Err(corrupt(format!(
                "{} symbols cannot fit in {} bits",
                symbol_total, bit_count
            )));
        }
        debug!(
            "Header: {} symbols, {} payload bits, {} symbols encoded.",
            symbol_count, bit_count, symbol_total
        );

        // Read the code table
        let mut codes = BTreeMap::new();
        for _ in 0..symbol_count {
            let sym_len = need(br.byte(), "code table")?;
            if sym_len != SYMBOL_LEN {
                return Err(corrupt(format!("invalid symbol length {}", sym_len)));
            }
            let sym = need(br.byte(), "code table")?;
            let code_len = need(br.byte(), "code table")? as usize;
            if code_len == 0 {
                return Err(corrupt(format!("empty code for symbol {:#04x}", sym)));
            }
            let code_bytes = need(br.bytes((code_len + 7) / 8), "code table")?;
            let code = BitString::from_bytes(code_bytes, code_len).ok_or_else(|| {
                corrupt(format!("non-zero padding in code for symbol {:#04x}", sym))
            })?;
            if codes.insert(sym, code).is_some() {
                return Err(corrupt(format!("symbol {:#04x} appears twice", sym)));
            }
        }
        let table = CodeTable::from_codes(codes)?;
        trace!("Code table read, payload starts at {}.", br.loc());

        // Now the payload: exactly as many bytes as the bit count needs
        let payload_len = usize::try_from(bit_count / 8 + u64::from(bit_count % 8 != 0))
            .map_err(|_| corrupt(format!("bit count {} is too large", bit_count)))?;
        let payload_bytes = br.bytes(payload_len)?.ok_or_else(|| {
            error!("Payload is shorter than the {} bits in the header.", bit_count);
            corrupt(format!("payload holds fewer than {} bits", bit_count))
        })?;
        let payload = BitString::from_bytes(payload_bytes, bit_count as usize)
            .ok_or_else(|| corrupt("non-zero padding bits after the payload"))?;
        if !br.at_end()? {
            return Err(corrupt("trailing data after the payload"));
        }

        Ok(Artifact {
            table,
            payload,
            symbol_total,
        })
    }
}

fn corrupt<S: Into<String>>(reason: S) -> HuffError {
    HuffError::CorruptArtifact(reason.into())
}

/// Unwrap a BitReader result, turning end of data into a CorruptArtifact naming the field.
fn need<T>(value: io::Result<Option<T>>, field: &str) -> Result<T> {
    value?.ok_or_else(|| {
        error!("Artifact ends inside the {}.", field);
        corrupt(format!("truncated {}", field))
    })
}
