use super::{ALPHABET, SENTENCE};
use crate::{lookup2, mixhash, mixhash_str};

#[test]
fn known_vectors() {
    assert_eq!(lookup2(b""), 0);
    assert_eq!(lookup2(b"foobar"), 0x9D3F_FA02);
    assert_eq!(lookup2(b"hello world"), 0x1AA9_19E6);
    assert_eq!(lookup2(b"           "), 0xF559_76FA);
    assert_eq!(
        lookup2(b"1234567890abcdefghijklmnopqstuvwxyz"),
        0x49EA_EE3E
    );
    assert_eq!(lookup2(SENTENCE.as_bytes()), 0xCF87_4E3D);
}

#[test]
fn text_entry_point_agrees() {
    assert_eq!(mixhash_str(SENTENCE, 0).unwrap(), 0xCF87_4E3D);
    assert_eq!(mixhash_str("hello world", 0).unwrap(), 0x1AA9_19E6);
}

/// Lengths around the 12-byte block edge, where chunking goes wrong first.
#[test]
fn block_boundaries() {
    let expected: [(usize, u32); 9] = [
        (1, 0x29ee_c818),
        (4, 0x5ae6_1fa5),
        (8, 0x053f_775e),
        (9, 0x3a7b_0a5f),
        (11, 0xe52b_8e4c),
        (12, 0x0b1b_3ea5),
        (13, 0x3122_b031),
        (24, 0xd663_8b78),
        (25, 0x720b_6730),
    ];

    for (len, hash) in expected {
        assert_eq!(mixhash(&ALPHABET[..len], 0), hash, "length {}", len);
    }
}

#[test]
fn every_prefix_is_distinct() {
    let mut seen = std::collections::HashSet::new();
    for len in 0..=ALPHABET.len() {
        assert!(seen.insert(lookup2(&ALPHABET[..len])), "length {}", len);
    }
}

#[test]
fn deterministic() {
    for len in 0..=ALPHABET.len() {
        let key = &ALPHABET[..len];
        assert_eq!(mixhash(key, 0x1234_5678), mixhash(key, 0x1234_5678));
    }
}

#[test]
fn input_untouched() {
    let key = ALPHABET.to_vec();
    let _ = lookup2(&key);
    assert_eq!(key, ALPHABET);
}
