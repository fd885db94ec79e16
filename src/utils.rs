//! Utility functions used across the library.

use std::io::{self, Read};

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the CBC chaining paths.
///
/// # Panics (by contract)
///
/// Panics if any slice is shorter than 16 bytes. All callers pass exact
/// 16-byte blocks.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// XORs `mask` into `data` in place, over the shorter of the two lengths.
#[inline(always)]
pub fn xor_in_place(data: &mut [u8], mask: &[u8]) {
    for (byte, m) in data.iter_mut().zip(mask) {
        *byte ^= m;
    }
}

/// Read until `buf` is full or the reader reports end of input.
///
/// Returns the number of bytes read. Unlike `read_exact`, a short count is not
/// an error; `Interrupted` is retried.
pub fn read_fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn xor_blocks_is_self_inverse() {
        let a = [0xA5u8; 16];
        let b: [u8; 16] = core::array::from_fn(|i| i as u8);
        let mut once = [0u8; 16];
        let mut twice = [0u8; 16];
        xor_blocks(&a, &b, &mut once);
        xor_blocks(&once, &b, &mut twice);
        assert_eq!(twice, a);
    }

    #[test]
    fn xor_in_place_stops_at_shorter_slice() {
        let mut data = [0xFFu8; 4];
        xor_in_place(&mut data, &[0x0F, 0xF0]);
        assert_eq!(data, [0xF0, 0x0F, 0xFF, 0xFF]);
    }

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn read_fill_collects_short_reads() {
        let mut buf = [0u8; 5];
        let n = read_fill(&mut Trickle(b"abcdefg"), &mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"abcde");
    }

    #[test]
    fn read_fill_reports_eof_count() {
        let mut buf = [0u8; 8];
        let n = read_fill(&mut Cursor::new(b"abc"), &mut buf).unwrap();
        assert_eq!(n, 3);
    }
}
