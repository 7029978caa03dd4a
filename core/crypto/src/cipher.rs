//! Authenticated encryption using AES-256-GCM.
//!
//! Every stored object is sealed under its own freshly generated 256-bit
//! key, so nonces only need to be unique per key; a random 16-byte nonce
//! per call satisfies that with overwhelming probability. The GCM tag is
//! kept detached from the ciphertext so the envelope fields can be
//! persisted independently.

use aes_gcm::{
    aead::{
        generic_array::{typenum::U16, GenericArray},
        AeadInPlace, KeyInit,
    },
    aes::Aes256,
    AesGcm,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use lockbox_common::{Error, Result};

/// Length of object keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Nonce size in bytes.
pub const NONCE_LENGTH: usize = 16;

/// Authentication tag size in bytes.
pub const TAG_LENGTH: usize = 16;

/// AES-256-GCM instantiated with a 16-byte nonce.
type Cipher = AesGcm<Aes256, U16>;

/// Symmetric key protecting a single stored object.
///
/// Generated fresh for every object and never reused. The key bytes are
/// zeroized on drop and redacted from debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ObjectKey {
    key: [u8; KEY_LENGTH],
}

impl ObjectKey {
    /// Create an object key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    /// Generate a random object key from the given randomness source.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut key = [0u8; KEY_LENGTH];
        rng.fill_bytes(&mut key);
        Self { key }
    }

    /// Generate a random object key from the operating system RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey([REDACTED])")
    }
}

impl Serialize for ObjectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(self.key))
    }
}

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let mut decoded = STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)?;
        if decoded.len() != KEY_LENGTH {
            decoded.zeroize();
            return Err(serde::de::Error::custom(format!(
                "expected {} key bytes, got {}",
                KEY_LENGTH,
                decoded.len()
            )));
        }
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { key })
    }
}

/// The bundle needed to recover a plaintext.
///
/// The ciphertext carries no embedded framing; key, nonce and tag travel
/// detached so they can be persisted away from the ciphertext.
#[derive(Debug, Clone)]
pub struct EncryptedEnvelope {
    /// Authenticated ciphertext.
    pub ciphertext: Vec<u8>,
    /// Key used for this object only.
    pub key: ObjectKey,
    /// Nonce, unique per encryption under the key.
    pub nonce: [u8; NONCE_LENGTH],
    /// Detached authentication tag over the ciphertext.
    pub tag: [u8; TAG_LENGTH],
}

/// Generate a fresh nonce from the given randomness source.
pub fn generate_nonce_with<R: RngCore + CryptoRng>(rng: &mut R) -> [u8; NONCE_LENGTH] {
    let mut nonce = [0u8; NONCE_LENGTH];
    rng.fill_bytes(&mut nonce);
    nonce
}

/// Generate a fresh nonce from the operating system RNG.
pub fn generate_nonce() -> [u8; NONCE_LENGTH] {
    generate_nonce_with(&mut OsRng)
}

/// Encrypt plaintext under a freshly generated key.
///
/// # Postconditions
/// - The returned envelope holds a key used for no other object
/// - The nonce is random and fresh for this call
///
/// # Errors
/// - Returns `Error::Crypto` if the underlying primitive fails
pub fn seal<R: RngCore + CryptoRng>(rng: &mut R, plaintext: &[u8]) -> Result<EncryptedEnvelope> {
    let key = ObjectKey::generate_with(rng);
    seal_with_key(rng, &key, plaintext)
}

/// Encrypt plaintext under a caller-supplied key.
///
/// The nonce is still generated fresh on every call; callers must not rely
/// on deterministic output.
///
/// # Errors
/// - Returns `Error::Crypto` if the underlying primitive fails
pub fn seal_with_key<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &ObjectKey,
    plaintext: &[u8],
) -> Result<EncryptedEnvelope> {
    let nonce = generate_nonce_with(rng);

    let cipher = Cipher::new(GenericArray::from_slice(key.as_bytes()));
    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut ciphertext)
        .map_err(|_| Error::Crypto("AEAD encryption failed".to_string()))?;

    let mut tag_bytes = [0u8; TAG_LENGTH];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(EncryptedEnvelope {
        ciphertext,
        key: key.clone(),
        nonce,
        tag: tag_bytes,
    })
}

/// Decrypt an envelope, verifying its authentication tag.
///
/// # Postconditions
/// - Returns the original plaintext only if the tag verifies
///
/// # Errors
/// - Returns `Error::Authentication` on any verification failure. Wrong
///   key, tampered ciphertext, and corrupted nonce or tag are deliberately
///   indistinguishable; no partial plaintext is ever exposed.
pub fn open(envelope: &EncryptedEnvelope) -> Result<Vec<u8>> {
    let cipher = Cipher::new(GenericArray::from_slice(envelope.key.as_bytes()));
    let mut plaintext = envelope.ciphertext.clone();

    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&envelope.nonce),
            b"",
            &mut plaintext,
            GenericArray::from_slice(&envelope.tag),
        )
        .map_err(|_| Error::Authentication("envelope verification failed".to_string()))?;

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_seal_open_roundtrip() {
        let envelope = seal(&mut OsRng, b"Hello, World!").unwrap();
        let decrypted = open(&envelope).unwrap();

        assert_eq!(decrypted, b"Hello, World!");
    }

    #[test]
    fn test_seal_with_key_roundtrip() {
        let key = ObjectKey::from_bytes([42u8; KEY_LENGTH]);
        let envelope = seal_with_key(&mut OsRng, &key, b"payload").unwrap();

        assert_eq!(open(&envelope).unwrap(), b"payload");
    }

    #[test]
    fn test_ciphertext_length_matches_plaintext() {
        let plaintext = b"Test message";
        let envelope = seal(&mut OsRng, plaintext).unwrap();

        // Detached tag: ciphertext is exactly plaintext-sized
        assert_eq!(envelope.ciphertext.len(), plaintext.len());
    }

    #[test]
    fn test_fresh_key_and_nonce_each_call() {
        let e1 = seal(&mut OsRng, b"same plaintext").unwrap();
        let e2 = seal(&mut OsRng, b"same plaintext").unwrap();

        assert_ne!(e1.key.as_bytes(), e2.key.as_bytes());
        assert_ne!(e1.nonce, e2.nonce);
        assert_ne!(e1.ciphertext, e2.ciphertext);
    }

    #[test]
    fn test_fresh_nonce_under_fixed_key() {
        let key = ObjectKey::from_bytes([7u8; KEY_LENGTH]);
        let e1 = seal_with_key(&mut OsRng, &key, b"data").unwrap();
        let e2 = seal_with_key(&mut OsRng, &key, b"data").unwrap();

        assert_ne!(e1.nonce, e2.nonce);
    }

    #[test]
    fn test_wrong_key_fails() {
        let mut envelope = seal(&mut OsRng, b"Secret data").unwrap();
        envelope.key = ObjectKey::from_bytes([0u8; KEY_LENGTH]);

        assert!(matches!(
            open(&envelope),
            Err(lockbox_common::Error::Authentication(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut envelope = seal(&mut OsRng, b"Important data").unwrap();
        envelope.ciphertext[3] ^= 0x01;

        assert!(matches!(
            open(&envelope),
            Err(lockbox_common::Error::Authentication(_))
        ));
    }

    #[test]
    fn test_tampered_tag_fails() {
        let mut envelope = seal(&mut OsRng, b"Important data").unwrap();
        envelope.tag[0] ^= 0x01;

        assert!(matches!(
            open(&envelope),
            Err(lockbox_common::Error::Authentication(_))
        ));
    }

    #[test]
    fn test_tampered_nonce_fails() {
        let mut envelope = seal(&mut OsRng, b"Important data").unwrap();
        envelope.nonce[0] ^= 0x01;

        assert!(matches!(
            open(&envelope),
            Err(lockbox_common::Error::Authentication(_))
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let envelope = seal(&mut OsRng, b"").unwrap();
        assert_eq!(open(&envelope).unwrap(), b"");
    }

    #[test]
    fn test_large_plaintext() {
        let plaintext = vec![0xABu8; 1_000_000]; // 1 MB
        let envelope = seal(&mut OsRng, &plaintext).unwrap();

        assert_eq!(open(&envelope).unwrap(), plaintext);
    }

    #[test]
    fn test_deterministic_rng_injection() {
        let mut rng1 = rand::rngs::StdRng::seed_from_u64(99);
        let mut rng2 = rand::rngs::StdRng::seed_from_u64(99);

        let e1 = seal(&mut rng1, b"data").unwrap();
        let e2 = seal(&mut rng2, b"data").unwrap();

        // Same seed, same key/nonce, same ciphertext
        assert_eq!(e1.key.as_bytes(), e2.key.as_bytes());
        assert_eq!(e1.nonce, e2.nonce);
        assert_eq!(e1.ciphertext, e2.ciphertext);
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = ObjectKey::from_bytes([42u8; KEY_LENGTH]);
        let rendered = format!("{:?}", key);

        assert!(!rendered.contains("42"));
        assert!(rendered.contains("REDACTED"));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_arbitrary_payloads(
            plaintext in proptest::collection::vec(any::<u8>(), 0..2048)
        ) {
            let envelope = seal(&mut OsRng, &plaintext).unwrap();
            prop_assert_eq!(open(&envelope).unwrap(), plaintext);
        }
    }
}
