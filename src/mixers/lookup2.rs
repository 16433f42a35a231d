use crate::lookup2::{lookup2, mix, BLOCK_SIZE_BYTES, GOLDEN_RATIO};

pub const IN_SIZE_BYTES: usize = BLOCK_SIZE_BYTES;
pub const OUT_SIZE_BYTES: usize = 96 / 8;
pub const DIGEST_SIZE_BYTES: usize = 32 / 8;

pub const HASH_OUT_SIZE_BYTES: usize = DIGEST_SIZE_BYTES;

/// The lookup2 block mixer, applied once to the first block of a seed-0
/// hash.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let word = |i: usize| u32::from_le_bytes([
        in_bytes[i],
        in_bytes[i + 1],
        in_bytes[i + 2],
        in_bytes[i + 3],
    ]);

    let (a, b, c) = mix(
        word(0).wrapping_add(GOLDEN_RATIO),
        word(4).wrapping_add(GOLDEN_RATIO),
        word(8),
    );

    out_bytes[0..4].copy_from_slice(&a.to_le_bytes());
    out_bytes[4..8].copy_from_slice(&b.to_le_bytes());
    out_bytes[8..12].copy_from_slice(&c.to_le_bytes());
}

/// The complete hash of a 12-byte key.  This goes through two mixes: the
/// full block, then the empty tail with the length.
pub fn hash_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == HASH_OUT_SIZE_BYTES);

    out_bytes.copy_from_slice(&lookup2(in_bytes).to_le_bytes());
}
