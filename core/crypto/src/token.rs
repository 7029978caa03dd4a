//! Secure random token generation.
//!
//! Tokens are out-of-band identifiers (share invitations and the like),
//! not key material; keys come from `cipher::ObjectKey`.

use rand::{rngs::OsRng, CryptoRng, RngCore};

/// Default token length in bytes.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generate a random token of `length` bytes, rendered as lowercase hex,
/// from the given randomness source.
pub fn generate_token_with<R: RngCore + CryptoRng>(rng: &mut R, length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a random token of `length` bytes from the operating system RNG.
pub fn generate_token(length: usize) -> String {
    generate_token_with(&mut OsRng, length)
}
