// Password hashing utilities
// Uses bcrypt; only hashes are ever stored

use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Lowest work factor bcrypt accepts; only suitable for tests
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hashes a password using bcrypt
///
/// # Arguments
/// * `password` - The plaintext password to hash
/// * `cost` - bcrypt work factor (4-31)
///
/// # Returns
/// * `Ok(String)` - The bcrypt hash
/// * `Err(String)` - If hashing fails or the cost is out of range
///
/// # Example
/// ```
/// use pvz_api::auth::password::{hash_password, MIN_COST};
///
/// let hash = hash_password("employee-secret", MIN_COST).expect("valid hash");
/// assert!(hash.starts_with("$2"));
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, String> {
    hash(password, cost).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(bool)` - True if password matches, false otherwise
/// * `Err(String)` - If the stored hash is malformed
///
/// # Example
/// ```
/// use pvz_api::auth::password::{hash_password, verify_password, MIN_COST};
///
/// let hash = hash_password("moderator-secret", MIN_COST).unwrap();
/// assert!(verify_password("moderator-secret", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("test_password_123", MIN_COST).expect("valid hash");

        assert!(verify_password("test_password_123", &hash).expect("valid verification"));
    }

    #[test]
    fn verify_wrong_password() {
        let hash = hash_password("test_password_123", MIN_COST).expect("valid hash");

        assert!(!verify_password("wrong_password", &hash).expect("valid verification"));
    }

    #[test]
    fn cost_below_minimum_fails() {
        assert!(hash_password("pw", MIN_COST).is_ok());
        assert!(hash_password("pw", MIN_COST - 1).is_err());
    }

    #[test]
    fn cost_above_maximum_fails() {
        assert!(hash_password("pw", MAX_COST + 1).is_err());
    }

    #[test]
    fn malformed_hash_fails() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn hashes_are_salted() {
        let hash1 = hash_password("same", MIN_COST).unwrap();
        let hash2 = hash_password("same", MIN_COST).unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("same", &hash1).unwrap());
        assert!(verify_password("same", &hash2).unwrap());
    }
}
