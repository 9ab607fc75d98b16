use chrono::DateTime;
use chrono::Utc;

/// A freshly minted access token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
