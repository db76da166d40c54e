//! The huffman module builds the prefix code used by huffzip. Decoding the huffman data happens in the
//! decompress module.
//!
//! One static code is built per input: the whole input is counted first, then the two lightest nodes
//! are merged over and over until a single tree remains. Walking that tree gives each symbol its code,
//! with frequent symbols getting shorter codes.
//!
//! - min_heap: the priority queue the tree builder pulls the lightest nodes from.
//! - huffman: the tree itself and the walk that turns it into codes.
//! - code_table: the symbol -> code map, its validation, and the inverted map used for decoding.
//!
//! The process of building the tree is inherently sequential and does not benefit from multithreading.
//!

pub mod code_table;
pub mod huffman;
pub mod min_heap;
