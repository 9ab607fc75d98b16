use std::fmt;

use thiserror::Error;

/// Error type for signing key provisioning.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Signing key is not configured")]
    Missing,

    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Symmetric key used for HMAC-SHA256 token signatures.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// HS256 keys shorter than the digest size weaken the MAC.
    pub const MIN_LENGTH: usize = 32;

    /// Create a signing key from raw bytes.
    ///
    /// # Errors
    /// * `Missing` - Key is empty
    /// * `TooShort` - Key is shorter than 32 bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KeyError::Missing);
        }
        if bytes.len() < Self::MIN_LENGTH {
            return Err(KeyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}

/// Supplies the token signing key at process start.
///
/// Implementations fetch the key from wherever secrets live (configuration,
/// environment, a secret store). The key is read once and held for the
/// lifetime of the codec; rotation is not supported.
pub trait KeyProvider: Send + Sync {
    fn current_signing_key(&self) -> Result<SigningKey, KeyError>;
}

/// Key provider over a secret that was already loaded, typically from
/// layered configuration (`JWT__SECRET`).
#[derive(Clone)]
pub struct StaticKeyProvider {
    secret: String,
}

impl StaticKeyProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn current_signing_key(&self) -> Result<SigningKey, KeyError> {
        SigningKey::new(self.secret.as_bytes())
    }
}

impl fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeyProvider")
            .field("secret", &"<redacted>")
            .finish()
    }
}
