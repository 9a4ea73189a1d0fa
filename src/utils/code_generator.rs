//! Random short code generation.
//!
//! Codes are drawn from a 62-character alphanumeric alphabet. The generator only
//! supplies candidates: uniqueness is decided by the allocation policy in
//! [`crate::application::services::LinkService`] and enforced by the store.

use rand::Rng;

/// Digits, lowercase and uppercase ASCII letters.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest length [`generate_code`] accepts.
pub const MIN_GENERATED_LENGTH: usize = 6;

/// Longest length [`generate_code`] accepts.
pub const MAX_GENERATED_LENGTH: usize = 8;

/// Requested code length is outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Code length must be between 6 and 8 characters, got {0}")]
pub struct InvalidLength(pub usize);

/// Generates a random code of `length` alphanumeric characters.
///
/// Every character is picked independently and uniformly from [`ALPHABET`]
/// using the thread-local RNG. Not suitable for secrets.
///
/// # Errors
///
/// Returns [`InvalidLength`] unless `length` is in
/// `MIN_GENERATED_LENGTH..=MAX_GENERATED_LENGTH`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, InvalidLength> {
    if !(MIN_GENERATED_LENGTH..=MAX_GENERATED_LENGTH).contains(&length) {
        return Err(InvalidLength(length));
    }

    let mut rng = rand::rng();

    Ok((0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect())
}
