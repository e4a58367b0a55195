//! Credential hashing.
//!
//! This module provides:
//! - The `CredentialHasher` capability injected into identity operations
//! - An Argon2id implementation

mod password;

pub use password::{Argon2Hasher, PasswordError};

use serde::{Deserialize, Serialize};

/// Stored credential: a per-user salt plus the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Per-user salt.
    pub salt: String,
    /// Digest of the password under `salt`.
    pub digest: String,
}

/// Hashes and verifies passwords.
pub trait CredentialHasher: Send + Sync {
    /// Produces a salted digest of `password`.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::HashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<Credential, PasswordError>;

    /// Returns `true` when `password` matches `credential`.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::InvalidHash` if the stored credential is
    /// malformed.
    fn verify(&self, password: &str, credential: &Credential) -> Result<bool, PasswordError>;
}
