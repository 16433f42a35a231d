use super::{ALPHABET, SENTENCE};
use crate::{ooat, ooat_chars, ooat_str};

#[test]
fn known_vectors() {
    assert_eq!(ooat(b""), 0);
    assert_eq!(ooat(b"foobar"), 0xF952_FDE7);
    assert_eq!(ooat(b"hello world"), 0x3E4A_5A57);
    assert_eq!(ooat(b"           "), 0x9AEA_F441);
    assert_eq!(ooat(b"1234567890abcdefghijklmnopqstuvwxyz"), 0xB77A_0169);
    assert_eq!(ooat(SENTENCE.as_bytes()), 0x768E_CFFE);
}

#[test]
fn identifiers() {
    assert_eq!(ooat_str("Character").unwrap(), 1_715_686_685);
    assert_eq!(ooat_str("ForceField").unwrap(), 3_251_468_866);
    assert_eq!(ooat_str("SimpleSpriteParticleEmitter").unwrap(), 2_890_262_765);
}

#[test]
fn entry_points_agree_on_ascii() {
    for len in 0..=ALPHABET.len() {
        let key = &ALPHABET[..len];
        let text = std::str::from_utf8(key).unwrap();
        assert_eq!(ooat_str(text).unwrap(), ooat(key));
        assert_eq!(ooat_chars(text.chars()), ooat(key));
    }
}

#[test]
fn prefixes() {
    assert_eq!(ooat(&ALPHABET[..4]), 0xcd8b_6206);
    assert_eq!(ooat(&ALPHABET[..12]), 0x605b_0340);
    assert_eq!(ooat(&ALPHABET[..25]), 0x6012_0ab5);
}
