//! Password custody using Argon2id.
//!
//! Only PHC-formatted digests ever leave this module; plaintext is never
//! stored or logged.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// OWASP 2024 baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
const MEMORY_COST_KIB: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Invalid Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `plaintext` with a fresh random salt.
///
/// # Example
/// ```
/// use shared::password::hash_password;
///
/// let digest = hash_password("queen-bee-2023").unwrap();
/// assert!(digest.starts_with("$argon2id$"));
/// ```
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Checks `plaintext` against a stored digest.
///
/// Returns `Ok(false)` on mismatch and an error only when the digest itself
/// cannot be parsed or the verifier fails for another reason. The digest
/// carries its own parameters, so older hashes keep verifying after the
/// constants above change.
///
/// # Example
/// ```
/// use shared::password::{hash_password, verify_password};
///
/// let digest = hash_password("smoker").unwrap();
/// assert!(verify_password("smoker", &digest).unwrap());
/// assert!(!verify_password("veil", &digest).unwrap());
/// ```
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(digest).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::Password;
    use fake::Fake;

    #[test]
    fn test_hash_is_argon2id_phc() {
        let digest = hash_password("frames-and-foundation").unwrap();
        assert!(digest.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_same_plaintext_gets_distinct_salts() {
        let first = hash_password("propolis").unwrap();
        let second = hash_password("propolis").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_round_trip_for_generated_passwords() {
        for _ in 0..3 {
            let plaintext: String = Password(8..24).fake();
            let digest = hash_password(&plaintext).unwrap();
            assert!(verify_password(&plaintext, &digest).unwrap());
        }
    }

    #[test]
    fn test_other_plaintext_does_not_verify() {
        let digest = hash_password("drone-comb").unwrap();
        assert!(!verify_password("worker-comb", &digest).unwrap());
    }

    #[test]
    fn test_empty_and_unicode_plaintexts() {
        let empty = hash_password("").unwrap();
        assert!(verify_password("", &empty).unwrap());
        assert!(!verify_password(" ", &empty).unwrap());

        let unicode = hash_password("пчела-蜜蜂-abeille").unwrap();
        assert!(verify_password("пчела-蜜蜂-abeille", &unicode).unwrap());
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        let result = verify_password("anything", "plain-text-in-db");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_password_error_display() {
        let err = PasswordError::HashError("boom".to_string());
        assert!(format!("{}", err).contains("boom"));
        assert_eq!(
            format!("{}", PasswordError::InvalidHashFormat),
            "Invalid password hash format"
        );
    }
}
