//! Password hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant with secure defaults. The salt is
//! stored beside the digest, and verification refuses a digest whose embedded
//! salt differs from the stored one.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use super::{Credential, CredentialHasher};

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password.
    #[error("failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Argon2id implementation of [`CredentialHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    /// Hashes a password with a freshly generated salt.
    ///
    /// # Example
    ///
    /// ```
    /// use bankline_core::auth::{Argon2Hasher, CredentialHasher};
    ///
    /// let credential = Argon2Hasher.hash("my_secure_password").unwrap();
    /// assert!(credential.digest.starts_with("$argon2id$"));
    /// ```
    fn hash(&self, password: &str) -> Result<Credential, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let digest = argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(Credential {
            salt: salt.as_str().to_string(),
            digest,
        })
    }

    /// Verifies a password against a stored credential.
    ///
    /// # Example
    ///
    /// ```
    /// use bankline_core::auth::{Argon2Hasher, CredentialHasher};
    ///
    /// let credential = Argon2Hasher.hash("my_password").unwrap();
    /// assert!(Argon2Hasher.verify("my_password", &credential).unwrap());
    /// assert!(!Argon2Hasher.verify("wrong_password", &credential).unwrap());
    /// ```
    fn verify(&self, password: &str, credential: &Credential) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(&credential.digest).map_err(|_| PasswordError::InvalidHash)?;

        if parsed_hash.salt.map(|salt| salt.as_str()) != Some(credential.salt.as_str()) {
            return Err(PasswordError::InvalidHash);
        }

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerifyError(e.to_string())),
        }
    }
}
