//! Jenkins' one-at-a-time hash.
//!
//! Each input element is added into a single 32-bit accumulator and stirred
//! with a shift/add/xor step, followed by a short final avalanche.

use crate::bits::rshift_zero_padded;
use crate::error::{Error, Result};

#[inline(always)]
fn absorb(h: u32, value: u32) -> u32 {
    let mut h = h.wrapping_add(value);
    h = h.wrapping_add(h << 10);
    h ^ rshift_zero_padded(h, 6)
}

#[inline(always)]
fn finish(mut h: u32) -> u32 {
    h = h.wrapping_add(h << 3);
    h ^= rshift_zero_padded(h, 11);
    h.wrapping_add(h << 15)
}

/// Hashes raw bytes.
pub fn ooat(data: &[u8]) -> u32 {
    finish(data.iter().fold(0, |h, &byte| absorb(h, byte as u32)))
}

/// Hashes characters by their full code point.
///
/// Code points above U+00FF are added unmasked, so for such text the result
/// differs from hashing any byte encoding of it.  Use [`ooat_str`] to rule
/// that case out.
pub fn ooat_chars<I>(chars: I) -> u32
where
    I: IntoIterator<Item = char>,
{
    finish(chars.into_iter().fold(0, |h, ch| absorb(h, ch as u32)))
}

/// Hashes Latin-1 text, one byte per character.
pub fn ooat_str(text: &str) -> Result<u32> {
    let mut h = 0;
    for (index, ch) in text.chars().enumerate() {
        if ch as u32 > 0xff {
            return Err(Error::InvalidInputEncoding {
                index,
                ch,
                encoding: "Latin-1",
            });
        }
        h = absorb(h, ch as u32);
    }

    Ok(finish(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(ooat(b""), 0);
        assert_eq!(ooat_chars("".chars()), 0);
        assert_eq!(ooat_str("").unwrap(), 0);
    }

    #[test]
    fn single_byte() {
        assert_eq!(ooat(b"a"), 0xca2e_9442);
    }

    #[test]
    fn latin1_matches_byte_encoding() {
        assert_eq!(ooat_str("caf\u{e9}").unwrap(), 4_009_490_211);
        assert_eq!(ooat(&[b'c', b'a', b'f', 0xe9]), 4_009_490_211);
        assert_eq!(ooat_chars("caf\u{e9}".chars()), 4_009_490_211);
    }

    #[test]
    fn wide_code_points() {
        // U+20AC is added as 0x20ac, not as any of its UTF-8 bytes.
        assert_eq!(ooat_chars(['\u{20ac}']), finish(absorb(0, 0x20ac)));
        assert_ne!(ooat_chars(['\u{20ac}']), ooat("\u{20ac}".as_bytes()));

        match ooat_str("10\u{20ac}") {
            Err(Error::InvalidInputEncoding { index, ch, encoding }) => {
                assert_eq!(index, 2);
                assert_eq!(ch, '\u{20ac}');
                assert_eq!(encoding, "Latin-1");
            }
            other => panic!("expected an encoding error, got {:?}", other),
        }
    }
}
