//! Password hashing and Basic-Auth credential parsing.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Salted password hashing with a tunable bcrypt work factor.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh random salt, so equal
/// plaintexts never produce equal blobs and stored hashes cannot be compared
/// across users. [`PasswordHasher::verify`] recomputes from the salt embedded
/// in the blob and compares in constant time; a malformed blob verifies as
/// `false` rather than surfacing a fault to the caller.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::config().security.bcrypt_cost)
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(plaintext, self.cost)
    }

    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

/// Credentials carried by an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse `Basic base64(username:password)`.
    ///
    /// Any deviation (wrong scheme, bad base64, no separator, empty
    /// username) yields `None`; the gate collapses every failure into the
    /// same 401 so callers cannot tell which check tripped.
    pub fn parse(header: &str) -> Option<Self> {
        let encoded = header.strip_prefix("Basic ")?;
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}
