//! Bob Jenkins' lookup2 ("mix") hash and one-at-a-time hash, both producing
//! 32-bit digests, plus the avalanche tooling used to measure them.
//!
//! Neither hash is suitable for cryptographic use.

pub mod bits;
pub mod error;
pub mod lookup2;
pub mod mixers;
pub mod one_at_a_time;
pub mod stats;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use lookup2::{lookup2, mixhash, mixhash_chain, mixhash_str};
pub use one_at_a_time::{ooat, ooat_chars, ooat_str};
