//! The bitstream module forms the I/O subsystem for huffzip.
//!
//! Huffman codes are not byte aligned, so everything between the code table and the artifact on
//! disk goes through this module:
//! - bitstring: an owned, packed bit sequence (codes, the decoder accumulator, the payload).
//! - bitpacker: packs codes and fixed-width header fields into bytes, zero padding the last byte.
//! - bitreader: reads bits and fixed-width fields back from any io::Read source.
//!
//! This I/O subsystem is designed to efficiently interface with the other modules within huffzip. It is not intended for
//! more general use.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitstring;
