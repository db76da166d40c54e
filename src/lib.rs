//! huffzip: a static huffman file compressor.
//!
//! Version 0.1.0
//!
//! The whole input is counted, one optimal prefix code is built for it, and the code table is stored
//! next to the packed bits so the file can be restored exactly. Every byte value is a symbol;
//! character encodings are left to the caller.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip -k test.txt`
//!
//! This will compress the file and create the file test.txt.hfz, keeping the original.
//! `huffzip -d test.txt.hfz` restores it.
//!
//! From code:
//!
//! ```
//! let packed = huffzip::compress_bytes(b"aaabbc")?;
//! assert_eq!(huffzip::decompress_bytes(&packed)?, b"aaabbc");
//! # Ok::<(), huffzip::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use bitstream::bitstring::BitString;
pub use compression::compress::{compress_bytes, encode, encode_bits};
pub use compression::container::Artifact;
pub use compression::decompress::{decode, decode_bits, decompress_bytes};
pub use error::{HuffError, Result};
pub use huffman_coding::code_table::CodeTable;
pub use huffman_coding::huffman::HuffmanTree;
pub use huffman_coding::min_heap::MinHeap;
pub use tools::freq_count::{freqs, FreqTable};
