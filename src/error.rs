//! Error types for the huffzip codec.
//!
//! Every failure the codec can detect has its own variant so callers can tell a bad input apart
//! from a damaged artifact. None of them are retried or papered over inside the library.

use thiserror::Error;

/// Error variants for encoding, decoding and container handling.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The input held no symbols, so no code tree can be built.
    #[error("empty input: nothing to encode")]
    EmptyInput,

    /// The input contains a symbol with no entry in the code table.
    #[error("no code for symbol {0:#04x}")]
    MissingCode(u8),

    /// The artifact header, code table or payload is malformed or inconsistent.
    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// A code table is empty, holds an empty code, or is not prefix-free.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// The bitstream ended in the middle of a code, or did not match the header.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// An I/O error occurred at the artifact boundary.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for huffzip operations.
pub type Result<T> = std::result::Result<T, HuffError>;
