//! lookup2: Bob Jenkins' 1996 hash of a variable-length key into 32 bits.
//!
//! The key is consumed in 12-byte blocks, each added into three words that
//! are then scrambled by `mix()`.  Every 1-bit and 2-bit input delta achieves
//! avalanche, at roughly 36 + 6 * len instructions.

use crate::bits::rshift_zero_padded;
use crate::error::{Error, Result};

/// The golden ratio, an arbitrary starting value for `a` and `b`.
pub const GOLDEN_RATIO: u32 = 0x9e37_79b9;

pub const BLOCK_SIZE_BYTES: usize = 12;

// (a >> x, b ^= a << y, c >> z) for each of the three rounds of `mix()`.
const SHIFTS: [(u32, u32, u32); 3] = [(13, 8, 13), (12, 16, 5), (3, 10, 15)];

// Word (0 = a, 1 = b, 2 = c) and bit offset for each byte of a partial
// final block.  The lowest lane of `c` holds the key length instead.
const TAIL_LANES: [(usize, u32); BLOCK_SIZE_BYTES - 1] = [
    (0, 0),
    (0, 8),
    (0, 16),
    (0, 24),
    (1, 0),
    (1, 8),
    (1, 16),
    (1, 24),
    (2, 8),
    (2, 16),
    (2, 24),
];

/// Mixes three 32-bit words reversibly.
///
/// Run forward, every bit of `c` changes between 1/3 and 2/3 of the time
/// for any one- or two-bit delta in the inputs.
#[inline(always)]
pub fn mix(mut a: u32, mut b: u32, mut c: u32) -> (u32, u32, u32) {
    for &(s1, s2, s3) in SHIFTS.iter() {
        a = a.wrapping_sub(b).wrapping_sub(c);
        a ^= rshift_zero_padded(c, s1);

        b = b.wrapping_sub(c).wrapping_sub(a);
        b ^= a << s2;

        c = c.wrapping_sub(a).wrapping_sub(b);
        c ^= rshift_zero_padded(b, s3);
    }

    (a, b, c)
}

/// Hashes `data` with an initial value of `seed`.
///
/// The seed may be any 32-bit value, such as the hash of the previous key
/// (see [`mixhash_chain`]).  An empty key always hashes to 0, whatever the
/// seed.
pub fn mixhash(data: &[u8], seed: u32) -> u32 {
    if data.is_empty() {
        return 0;
    }

    let mut a = GOLDEN_RATIO;
    let mut b = GOLDEN_RATIO;
    let mut c = seed;

    let mut blocks = data.chunks_exact(BLOCK_SIZE_BYTES);
    for block in blocks.by_ref() {
        a = a.wrapping_add(fetch32(&block[0..4]));
        b = b.wrapping_add(fetch32(&block[4..8]));
        c = c.wrapping_add(fetch32(&block[8..12]));
        (a, b, c) = mix(a, b, c);
    }

    // Only the length modulo 2^32 takes part.
    c = c.wrapping_add(data.len() as u32);

    let mut words = [a, b, c];
    for (&byte, &(word, shift)) in blocks.remainder().iter().zip(TAIL_LANES.iter()) {
        words[word] = words[word].wrapping_add((byte as u32) << shift);
    }
    let [a, b, c] = words;

    mix(a, b, c).2
}

/// Hashes `data` with a seed of zero.
#[inline]
pub fn lookup2(data: &[u8]) -> u32 {
    mixhash(data, 0)
}

/// Hashes ASCII text.  Any other character is rejected rather than being
/// silently re-encoded.
pub fn mixhash_str(text: &str, seed: u32) -> Result<u32> {
    if let Some((index, ch)) = text.chars().enumerate().find(|(_, ch)| !ch.is_ascii()) {
        return Err(Error::InvalidInputEncoding {
            index,
            ch,
            encoding: "ASCII",
        });
    }

    Ok(mixhash(text.as_bytes(), seed))
}

/// Hashes a sequence of keys, seeding each key's hash with the previous
/// one.  Returns `seed` unchanged for an empty sequence.
pub fn mixhash_chain<'a, I>(keys: I, seed: u32) -> u32
where
    I: IntoIterator<Item = &'a [u8]>,
{
    keys.into_iter().fold(seed, |h, key| mixhash(key, h))
}

fn fetch32(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .enumerate()
        .fold(0, |word, (i, &byte)| word | ((byte as u32) << (8 * i)))
}
