//! The compression module runs the codec pipeline for huffzip.
//!
//! Compression happens in the following steps:
//! - Frequency count: count how often each byte value occurs in the whole input.
//! - Tree build: merge the two lightest nodes until one tree remains.
//! - Code table: walk the tree, 0 for left and 1 for right, to get each symbol's code.
//! - Encoding: concatenate the code of every input byte into one packed bitstream.
//! - Container: write the code table, the exact bit count and the packed bits as one artifact.
//!
//! Decompression follows the inverse of the compression process.
//! - Container: parse and validate the header and code table, then take exactly the payload bits.
//! - Decoding: match the bits against the inverted code table to recover the original bytes.
//!

pub mod compress;
pub mod container;
pub mod decompress;

use std::fs::OpenOptions;
use std::io::{self, Write};

use log::{error, info};

use crate::error::Result;
use crate::tools::cli::{HzOpts, Output};

/// Send a finished result where opts says it should go, then remove the input file unless
/// asked to keep it. An existing output file is only replaced when forced.
pub(crate) fn write_output(opts: &HzOpts, data: &[u8]) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
            // Output went to the terminal, so leave the input alone.
            return Ok(());
        }
        Output::File => {
            let fname = opts.output_file();
            let mut options = OpenOptions::new();
            options.write(true);
            if opts.force_overwrite {
                options.create(true).truncate(true);
            } else {
                options.create_new(true);
            }
            let mut f_out = options.open(&fname).map_err(|e| {
                error!("Can't open {} for writing: {}", fname, e);
                e
            })?;
            f_out.write_all(data)?;
            info!("Wrote {} bytes to {}.", data.len(), fname);
        }
    }

    if !opts.keep_input_files {
        std::fs::remove_file(&opts.file)?;
        info!("Removed input file {}.", opts.file);
    }
    Ok(())
}
