//! Authorization checks for vault operations.
//!
//! The core performs authorization only; identity is established by the
//! surrounding system and passed in as a [`PrincipalId`]. Two rights
//! exist: read (owner or share recipient) and ownership (delete, share).

use lockbox_common::{Error, PrincipalId, Result};
use lockbox_storage::ObjectRecord;

/// Require read access to a record.
///
/// Permitted for the owner and for principals in the share set.
///
/// # Errors
/// - `AccessDenied` otherwise
pub fn ensure_read(record: &ObjectRecord, requester: &PrincipalId) -> Result<()> {
    if record.can_read(requester) {
        Ok(())
    } else {
        Err(Error::AccessDenied(format!(
            "Principal {} may not read object {}",
            requester, record.id
        )))
    }
}

/// Require ownership of a record.
///
/// Sharing grants read access only; delete and share stay with the owner.
///
/// # Errors
/// - `AccessDenied` for any non-owner, shared or not
pub fn ensure_owner(record: &ObjectRecord, requester: &PrincipalId) -> Result<()> {
    if record.is_owner(requester) {
        Ok(())
    } else {
        Err(Error::AccessDenied(format!(
            "Principal {} does not own object {}",
            requester, record.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lockbox_common::{ObjectId, StorageKey};
    use lockbox_crypto::seal;
    use rand::rngs::OsRng;
    use std::collections::HashSet;

    fn record_owned_by(owner: &str) -> ObjectRecord {
        let (_, envelope) = seal(&mut OsRng, b"x").unwrap().split();
        ObjectRecord {
            id: ObjectId::new(),
            owner_id: PrincipalId::new(owner).unwrap(),
            filename: "f".to_string(),
            mime_type: "application/octet-stream".to_string(),
            size_bytes: 1,
            storage_key: StorageKey::new("k").unwrap(),
            envelope,
            shared_with: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_has_read_and_ownership() {
        let record = record_owned_by("alice");
        let alice = PrincipalId::new("alice").unwrap();

        assert!(ensure_read(&record, &alice).is_ok());
        assert!(ensure_owner(&record, &alice).is_ok());
    }

    #[test]
    fn test_stranger_has_neither() {
        let record = record_owned_by("alice");
        let mallory = PrincipalId::new("mallory").unwrap();

        assert!(matches!(
            ensure_read(&record, &mallory),
            Err(Error::AccessDenied(_))
        ));
        assert!(matches!(
            ensure_owner(&record, &mallory),
            Err(Error::AccessDenied(_))
        ));
    }

    #[test]
    fn test_share_recipient_reads_but_does_not_own() {
        let mut record = record_owned_by("alice");
        let bob = PrincipalId::new("bob").unwrap();
        record.shared_with.insert(bob.clone());

        assert!(ensure_read(&record, &bob).is_ok());
        assert!(matches!(
            ensure_owner(&record, &bob),
            Err(Error::AccessDenied(_))
        ));
    }
}
