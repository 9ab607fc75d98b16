use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::TokenError;
use crate::keys::KeyError;
use crate::keys::KeyProvider;
use crate::keys::SigningKey;

/// The only algorithm this codec signs with or accepts.
const PINNED_ALGORITHM: &str = "HS256";

/// Header fields inspected before any signature work.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Signs and parses compact HS256 tokens (`header.claims.signature`).
///
/// The codec only checks structure, algorithm and MAC. Expiry is left to the
/// caller, which owns the clock.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Create a codec from an already provisioned signing key.
    pub fn new(key: &SigningKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
        }
    }

    /// Create a codec with the key supplied by `provider`.
    ///
    /// # Errors
    /// * `KeyError` - The provider has no usable key
    pub fn from_provider(provider: &dyn KeyProvider) -> Result<Self, KeyError> {
        provider.current_signing_key().map(|key| Self::new(&key))
    }

    /// Sign a claims set for `subject`.
    ///
    /// # Arguments
    /// * `subject` - Username the token is issued to
    /// * `issued_at` - Issuance instant (`iat`)
    /// * `expires_at` - Expiry instant (`exp`)
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn sign(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, issued_at, expires_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Parse a token and verify its signature.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// Claims carried by the token (expiry not checked)
    ///
    /// # Errors
    /// * `Malformed` - Not three base64url segments, or header/claims do not decode
    /// * `InvalidSignature` - MAC mismatch, or header names an algorithm other than HS256
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let header = Self::decode_header(token)?;
        if header.alg != PINNED_ALGORITHM {
            return Err(TokenError::InvalidSignature);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        // Presence of sub/iat/exp is enforced by deserializing into Claims.
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    fn decode_header(token: &str) -> Result<RawHeader, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::Malformed(format!(
                "expected 3 non-empty segments, got {}",
                segments.len()
            )));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(segments[0])
            .map_err(|e| TokenError::Malformed(format!("header encoding: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| TokenError::Malformed(format!("header json: {}", e)))
    }
}
