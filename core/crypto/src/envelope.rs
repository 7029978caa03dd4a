//! Serializable envelope header.
//!
//! Bridges cipher output to the field set persisted in metadata records.
//! The header carries the key, nonce and detached tag; the ciphertext is
//! stored elsewhere and reunited with the header at decryption time. Binary
//! fields are encoded as fixed-width base64 strings, validated for exact
//! length on decode.

use serde::{Deserialize, Serialize};

use crate::cipher::{EncryptedEnvelope, ObjectKey, NONCE_LENGTH, TAG_LENGTH};

/// The persisted portion of an encrypted envelope.
///
/// Stored alongside object metadata, never alongside the ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    /// Per-object key.
    pub key: ObjectKey,
    /// Nonce used for the one encryption call.
    #[serde(with = "b64")]
    pub nonce: [u8; NONCE_LENGTH],
    /// Detached authentication tag.
    #[serde(with = "b64")]
    pub tag: [u8; TAG_LENGTH],
}

impl EncryptedEnvelope {
    /// Split an envelope into its ciphertext and persisted header.
    pub fn split(self) -> (Vec<u8>, EnvelopeHeader) {
        let EncryptedEnvelope {
            ciphertext,
            key,
            nonce,
            tag,
        } = self;
        (ciphertext, EnvelopeHeader { key, nonce, tag })
    }
}

impl EnvelopeHeader {
    /// Reunite a header with its ciphertext, restoring the full envelope.
    pub fn reunite(self, ciphertext: Vec<u8>) -> EncryptedEnvelope {
        EncryptedEnvelope {
            ciphertext,
            key: self.key,
            nonce: self.nonce,
            tag: self.tag,
        }
    }
}

/// Fixed-width base64 encoding for binary header fields.
mod b64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let decoded = STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)?;
        decoded.try_into().map_err(|bytes: Vec<u8>| {
            serde::de::Error::custom(format!("expected {} bytes, got {}", N, bytes.len()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{open, seal};
    use rand::rngs::OsRng;

    #[test]
    fn test_split_reunite_roundtrip() {
        let envelope = seal(&mut OsRng, b"hello envelope").unwrap();
        let key_bytes = *envelope.key.as_bytes();
        let nonce = envelope.nonce;
        let tag = envelope.tag;

        let (ciphertext, header) = envelope.split();
        let restored = header.reunite(ciphertext);

        assert_eq!(restored.key.as_bytes(), &key_bytes);
        assert_eq!(restored.nonce, nonce);
        assert_eq!(restored.tag, tag);
        assert_eq!(open(&restored).unwrap(), b"hello envelope");
    }

    #[test]
    fn test_header_serde_roundtrip() {
        let (_, header) = seal(&mut OsRng, b"payload").unwrap().split();

        let json = serde_json::to_string(&header).unwrap();
        let restored: EnvelopeHeader = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.key.as_bytes(), header.key.as_bytes());
        assert_eq!(restored.nonce, header.nonce);
        assert_eq!(restored.tag, header.tag);
    }

    #[test]
    fn test_header_serde_survives_storage_then_decrypts() {
        let envelope = seal(&mut OsRng, b"stored then fetched").unwrap();
        let (ciphertext, header) = envelope.split();

        let json = serde_json::to_string(&header).unwrap();
        let restored: EnvelopeHeader = serde_json::from_str(&json).unwrap();

        let plaintext = open(&restored.reunite(ciphertext)).unwrap();
        assert_eq!(plaintext, b"stored then fetched");
    }

    #[test]
    fn test_wrong_length_nonce_rejected() {
        let json = r#"{"key":"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=","nonce":"AAAA","tag":"AAAAAAAAAAAAAAAAAAAAAA=="}"#;
        assert!(serde_json::from_str::<EnvelopeHeader>(json).is_err());
    }

    #[test]
    fn test_wrong_length_key_rejected() {
        let json = r#"{"key":"AAAA","nonce":"AAAAAAAAAAAAAAAAAAAAAA==","tag":"AAAAAAAAAAAAAAAAAAAAAA=="}"#;
        assert!(serde_json::from_str::<EnvelopeHeader>(json).is_err());
    }

    #[test]
    fn test_malformed_base64_rejected() {
        let json = r#"{"key":"!!!not base64!!!","nonce":"AAAAAAAAAAAAAAAAAAAAAA==","tag":"AAAAAAAAAAAAAAAAAAAAAA=="}"#;
        assert!(serde_json::from_str::<EnvelopeHeader>(json).is_err());
    }

    #[test]
    fn test_header_debug_redacts_key() {
        let (_, header) = seal(&mut OsRng, b"x").unwrap().split();
        let rendered = format!("{:?}", header);

        assert!(rendered.contains("REDACTED"));
    }
}
