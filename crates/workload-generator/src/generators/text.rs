//! Random string generators.

use rand::Rng;
use workload_core::GeneratedValue;

/// Alphabet used for every generated string.
pub const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of `varchar` values.
pub const VARCHAR_LENGTH: usize = 10;

/// Length of `text` values.
pub const TEXT_LENGTH: usize = 20;

/// Generate a random alphanumeric string of the given length.
pub fn random_string<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Generate a `varchar` value.
pub fn generate_varchar<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::String(random_string(rng, VARCHAR_LENGTH))
}

/// Generate a `text` value.
pub fn generate_text<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::String(random_string(rng, TEXT_LENGTH))
}
