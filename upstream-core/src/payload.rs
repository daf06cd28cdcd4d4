//! Random letter payloads
//!
//! Letters are sliced as 6-bit groups out of a single 63-bit draw. Groups that
//! fall outside the 52-letter alphabet are skipped, never reduced modulo 52.

use rand::{rngs::SmallRng, RngCore, SeedableRng};

const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Bits needed to index a letter
const LETTER_INDEX_BITS: u32 = 6;
const LETTER_INDEX_MASK: u64 = (1 << LETTER_INDEX_BITS) - 1;
/// Letter indices that fit in 63 random bits
const LETTER_INDEX_MAX: u32 = 63 / LETTER_INDEX_BITS;

/// Generate `length` random letters from a freshly seeded source.
pub fn random_letters(length: usize) -> String {
    let mut rng = SmallRng::from_rng(&mut rand::rng());
    random_letters_with(length, &mut rng)
}

/// Generate `length` random letters from the supplied source.
pub fn random_letters_with<R: RngCore + ?Sized>(length: usize, rng: &mut R) -> String {
    let mut out = String::with_capacity(length);
    if length == 0 {
        return out;
    }

    let mut cache = next_63_bits(rng);
    let mut remain = LETTER_INDEX_MAX;
    while out.len() < length {
        if remain == 0 {
            cache = next_63_bits(rng);
            remain = LETTER_INDEX_MAX;
        }
        let idx = (cache & LETTER_INDEX_MASK) as usize;
        if let Some(&letter) = LETTERS.get(idx) {
            out.push(char::from(letter));
        }
        cache >>= LETTER_INDEX_BITS;
        remain -= 1;
    }

    out
}

#[inline]
fn next_63_bits<R: RngCore + ?Sized>(rng: &mut R) -> u64 {
    rng.next_u64() >> 1
}
