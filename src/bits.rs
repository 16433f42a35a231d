//! Fixed-width helpers shared by both hashes.

/// Zero-padded (logical) right shift.
///
/// `value` is first wrapped to 32 bits, so negative or wider intermediates
/// behave as their unsigned 32-bit residue.  Shifting by 32 or more gives 0.
#[inline(always)]
pub fn rshift_zero_padded<T: Into<i128>>(value: T, n: u32) -> u32 {
    let wide: i128 = value.into();
    (wide as u32).checked_shr(n).unwrap_or(0)
}

/// Number of buckets in a table indexed by `n` hash bits.
#[inline]
pub const fn hashsize(n: u32) -> u32 {
    1u32.wrapping_shl(n) & if n >= 32 { 0 } else { u32::MAX }
}

/// Mask that reduces a hash to its low `n` bits.
#[inline]
pub const fn hashmask(n: u32) -> u32 {
    hashsize(n).wrapping_sub(1)
}
