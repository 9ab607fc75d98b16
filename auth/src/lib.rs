//! Authentication primitives library
//!
//! Provides the security building blocks the credential service composes:
//! - Password hashing (Argon2id, tunable cost)
//! - Compact HS256 token signing and parsing with a pinned algorithm
//! - Injectable wall clock
//! - Signing key provisioning
//!
//! Nothing here touches storage or knows about principals; services define
//! their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Clock, StaticKeyProvider, SystemClock, TokenCodec};
//! use chrono::Duration;
//!
//! let provider = StaticKeyProvider::new("secret_key_at_least_32_bytes_long!");
//! let codec = TokenCodec::from_provider(&provider).unwrap();
//!
//! let now = SystemClock.now();
//! let token = codec.sign("alice", now, now + Duration::hours(1)).unwrap();
//! let claims = codec.parse(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod clock;
pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use keys::KeyError;
pub use keys::KeyProvider;
pub use keys::SigningKey;
pub use keys::StaticKeyProvider;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordParams;
