use std::sync::Arc;

use auth::Claims;
use auth::Clock;
use auth::TokenCodec;
use auth::TokenError;
use chrono::Duration;
use chrono::SubsecRound;

use crate::domain::errors::AuthError;
use crate::domain::token::models::IssuedToken;
use crate::principal::models::Principal;

/// Issues and checks access tokens.
///
/// Expiry is judged against the injected clock at the moment of the check.
/// Issuer and verifier are assumed to share one clock source; no skew
/// leeway is applied.
pub struct TokenService {
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenService {
    pub const DEFAULT_TTL_SECONDS: i64 = 3600;
    pub const MAX_TTL_SECONDS: i64 = 366 * 24 * 3600;

    /// Create a new token service.
    ///
    /// # Arguments
    /// * `codec` - Codec holding the signing key
    /// * `clock` - Time source for issuance and expiry checks
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `InvalidTokenLifetime` - `ttl` is not positive or exceeds `MAX_TTL_SECONDS`
    pub fn new(
        codec: TokenCodec,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        if ttl <= Duration::zero() || ttl > Duration::seconds(Self::MAX_TTL_SECONDS) {
            return Err(AuthError::InvalidTokenLifetime {
                seconds: ttl.num_seconds(),
                max: Self::MAX_TTL_SECONDS,
            });
        }

        Ok(Self { codec, clock, ttl })
    }

    /// Convert a configured lifetime in seconds, rejecting out-of-range values.
    ///
    /// # Errors
    /// * `InvalidTokenLifetime` - `seconds` is not in `1..=MAX_TTL_SECONDS`
    pub fn lifetime_from_seconds(seconds: i64) -> Result<Duration, AuthError> {
        if !(1..=Self::MAX_TTL_SECONDS).contains(&seconds) {
            return Err(AuthError::InvalidTokenLifetime {
                seconds,
                max: Self::MAX_TTL_SECONDS,
            });
        }

        Ok(Duration::seconds(seconds))
    }

    /// Issue a token for an authenticated principal.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token could not be signed, or the expiry is not representable
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        // Claims carry whole seconds; keep the reported window identical.
        let issued_at = self.clock.now().trunc_subsecs(0);
        let expires_at = issued_at.checked_add_signed(self.ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("expiry overflows after {}", issued_at))
        })?;

        let token = self
            .codec
            .sign(principal.username.as_str(), issued_at, expires_at)?;

        tracing::debug!(
            username = %principal.username,
            expires_at = %expires_at,
            "Token issued"
        );

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Parse a token and check it has not expired.
    ///
    /// # Errors
    /// * `Malformed` - Token does not parse structurally
    /// * `InvalidSignature` - MAC mismatch or unexpected algorithm
    /// * `Expired` - Signature valid but `exp` is not after now
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.codec.parse(token)?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Check a presented token belongs to `presented_username` and is live.
    ///
    /// Fails closed: any parse, signature or expiry problem yields false.
    pub fn validate(&self, presented_username: &str, token: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => claims.sub == presented_username,
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                false
            }
        }
    }
}
