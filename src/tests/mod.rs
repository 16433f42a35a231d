mod lookup2_vectors;
mod ooat_vectors;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

const SENTENCE: &str = "This is the time for all good men to come to the aid of their country";
