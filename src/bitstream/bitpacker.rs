use log::error;

use super::bitstring::BitString;

/// Creates a packed bitstream for output. Used both to concatenate huffman codes into the payload
/// and to lay out the fixed-width fields of the container.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
    bit_count: usize,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() (or finish())
    /// to move the last partial byte out of the queue before using the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
            bit_count: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /*
    NOTE: out24 takes a u32.  The 8 most significant bits of the word indicate how
    many of the least significant bits will be written. Those bits must be aligned to
    the least signficant bit. (The middle bits are masked out.)

    Eg 0000100_00000000_00000000_00000010 writes out 0010.
    */
    /// Writes 0-24 bits encoded with the number of bits to write in the most
    /// significant byte of a 32 bit word.
    pub fn out24(&mut self, data: u32) {
        let depth = (data >> 24) as u8; //get bit length by shifting out the 24 data bits
        if depth == 0 {
            return;
        }
        self.queue <<= depth; //shift queue by bit length
        self.queue |= (data & (0xffffffff >> (32 - depth))) as u64; //add data portion to queue
        self.q_bits += depth; //update depth of queue bits
        self.bit_count += depth as usize;
        self.write_stream();
    }

    /// Puts a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8;
        self.queue |= data as u64;
        self.q_bits += 8;
        self.bit_count += 8;
        self.write_stream();
    }

    /// Puts a 16 bit word on the stream.
    pub fn out16(&mut self, data: u16) {
        self.queue <<= 16;
        self.queue |= data as u64;
        self.q_bits += 16;
        self.bit_count += 16;
        self.write_stream();
    }

    /// Puts a 32 bit word on the stream.
    pub fn out32(&mut self, data: u32) {
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.bit_count += 32;
        self.write_stream();
    }

    /// Puts a 64 bit word on the stream, high half first.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Puts a run of bytes on the stream.
    pub fn out_bytes(&mut self, data: &[u8]) {
        if self.q_bits == 0 {
            // Byte aligned, so skip the queue
            self.output.extend_from_slice(data);
            self.bit_count += data.len() * 8;
        } else {
            data.iter().for_each(|&byte| self.out8(byte));
        }
    }

    /// Puts every bit of a BitString on the stream. Whole bytes go through out8, the tail
    /// (if any) through out24.
    pub fn out_bits(&mut self, bits: &BitString) {
        let full = bits.len() / 8;
        bits.as_bytes()[..full].iter().for_each(|&byte| self.out8(byte));
        let tail = bits.len() % 8;
        if tail > 0 {
            let last = bits.as_bytes()[full] >> (8 - tail);
            self.out24((tail as u32) << 24 | last as u32);
        }
    }

    /// Number of bits put on the stream so far, not counting padding.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits. Returns how many padding bits were added.
    pub fn flush(&mut self) -> u8 {
        let mut padding = 0;
        if self.q_bits > 0 {
            padding = 8 - self.q_bits;
            self.queue <<= padding; //pad the queue with zeros
            self.q_bits += padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        padding
    }

    /// Flush and hand back everything written as a BitString of exactly bit_count() bits.
    pub fn finish(mut self) -> BitString {
        self.flush();
        let len = self.bit_count;
        // flush() leaves whole bytes with zeroed padding, which is what from_bytes requires
        BitString::from_bytes(self.output, len).unwrap_or_default()
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!(
            "[{}.{}]",
            ((self.output.len() * 8) + self.q_bits as usize) / 8,
            ((self.output.len() * 8) + self.q_bits as usize) % 8
        )
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;
    use crate::bitstream::bitstring::BitString;

    #[test]
    fn out16_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00100001_00100000;
        bw.out16(data);
        assert_eq!(bw.flush(), 0);
        let out = bw.output;
        assert_eq!(out, "! ".as_bytes());
    }

    #[test]
    fn out24_and_loc_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00000011_00000000_00000000_00000101;
        bw.out24(data);
        assert_eq!("[0.3]", &bw.loc());
        assert_eq!(bw.flush(), 5);
        assert_eq!(bw.output, vec![0b1010_0000]);
        assert_eq!("[1.0]", &bw.loc());
        assert_eq!(bw.bit_count(), 3);
    }

    #[test]
    fn out64_test() {
        let mut bw = BitPacker::new(100);
        bw.out64(0x0102_0304_0506_0708);
        bw.flush();
        assert_eq!(bw.output, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn out_bits_unaligned_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bits(&"1".parse().unwrap());
        bw.out_bits(&"0110011001".parse().unwrap());
        bw.out_bytes(&[0xff]);
        assert_eq!(bw.bit_count(), 19);
        let bits = bw.finish();
        assert_eq!(bits.to_string(), "1011001100111111111");
        assert_eq!(bits.as_bytes(), &[0b1011_0011, 0b0011_1111, 0b1110_0000]);
    }

    #[test]
    fn finish_empty_test() {
        let bw = BitPacker::new(0);
        assert_eq!(bw.finish(), BitString::new());
    }
}
