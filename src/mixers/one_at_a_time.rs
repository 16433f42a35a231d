use crate::one_at_a_time::ooat;

pub const IN_SIZE_BYTES: usize = 32 / 8;
pub const OUT_SIZE_BYTES: usize = 32 / 8;
pub const DIGEST_SIZE_BYTES: usize = 32 / 8;

/// The one-at-a-time hash of a 4-byte key.
///
/// This hash has no blocks, so the whole thing (finalizer included) is
/// measured over a key the same width as its state.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    out_bytes.copy_from_slice(&ooat(in_bytes).to_le_bytes());
}
