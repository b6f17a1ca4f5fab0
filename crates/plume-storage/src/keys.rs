//! Shared key generation and validation for storage backends.

use crate::traits::{StorageError, StorageResult};
use plume_core::AccountId;

/// Key of the single profile-picture object owned by `account_id`.
pub fn profile_picture_key(account_id: AccountId) -> String {
    format!("profile-pictures/{}.png", account_id)
}

/// Reject keys that could escape a backend's namespace.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty()
        || storage_key.contains("..")
        || storage_key.contains('\\')
        || storage_key.contains('\0')
        || storage_key.starts_with('/')
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_profile_picture_key() {
        let id = Uuid::new_v4();
        assert_eq!(
            profile_picture_key(AccountId::new(id)),
            format!("profile-pictures/{}.png", id)
        );
    }

    #[test]
    fn test_generated_keys_are_valid() {
        let key = profile_picture_key(AccountId::new(Uuid::new_v4()));
        assert!(validate_key(&key).is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        for key in ["", "../etc/passwd", "/abs", "a/../b", "a\\b", "a\0b"] {
            assert!(validate_key(key).is_err(), "{:?} should be rejected", key);
        }
    }
}
