//! Short code generation and validation.
//!
//! Codes are random fixed-length strings over a 64-symbol URL-safe alphabet,
//! drawn from the OS entropy source.

/// Default code length. Six characters over 64 symbols give 64^6 (~68.7
/// billion) combinations; the expected collision count after N records is
/// roughly N^2 / (2 * 64^6).
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// URL-safe alphabet, 64 symbols so a masked random byte indexes it without bias.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generates a random short code of the given length.
///
/// Uniqueness is not checked here; the caller verifies against the store and
/// redraws on collision.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code(length: usize) -> String {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|&b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}

/// Returns true if `code` has the expected length and only alphabet symbols.
pub fn is_valid_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| ALPHABET.contains(&b))
}
