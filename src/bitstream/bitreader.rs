//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! Used by the container parser to pull fixed-width header fields, code table entries and the
//! payload back out of an artifact.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. Read errors are
//! passed back to the caller; running out of data is reported as Ok(None).
//!
use std::io::{self, ErrorKind, Read};

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0x80;

/// Reads a binary huffzip artifact.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader. The buffer is filled on the first read.
    pub fn new(source: R) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the next bit, or None if there is no more data to read
    pub fn bit(&mut self) -> io::Result<Option<bool>> {
        // If bit_index is == 0, check if we have a byte to read.
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index) != 0;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Ok(Some(bit))
    }

    /// Return the next n bits (n <= 64) as an integer, or None if there is no more data to read.
    pub fn bint(&mut self, mut n: usize) -> io::Result<Option<u64>> {
        debug_assert!(n <= 64);
        let mut result = 0_u64;

        // Finish off a partial byte one bit at a time.
        while n > 0 && self.bit_index > 0 {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u64,
                None => return Ok(None),
            }
            n -= 1;
        }
        // Get as many full bytes as we need.
        while n >= 8 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << 8 | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            n -= 8;
        }
        // Then whatever bits are still needed.
        while n > 0 {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u64,
                None => return Ok(None),
            }
            n -= 1;
        }
        Ok(Some(result))
    }

    /// Returns a byte, or None if there is no more data to read.
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Returns n bytes, or None if the source ends first.
    pub fn bytes(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        // n may come from an untrusted header, so don't reserve it all up front
        let mut result: Vec<u8> = Vec::with_capacity(n.min(BUFFER_SIZE));

        if self.bit_index == 0 {
            // Byte aligned: copy straight out of the buffer.
            while result.len() < n {
                if !self.have_data()? {
                    return Ok(None);
                }
                let take = (n - result.len()).min(self.buffer.len() - self.cursor);
                result.extend_from_slice(&self.buffer[self.cursor..self.cursor + take]);
                self.cursor += take;
            }
        } else {
            for _ in 0..n {
                match self.byte()? {
                    Some(byte) => result.push(byte),
                    None => return Ok(None),
                }
            }
        }
        Ok(Some(result))
    }

    /// True when every bit of the source has been consumed.
    pub fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.bit_index == 0 && !self.have_data()?)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
