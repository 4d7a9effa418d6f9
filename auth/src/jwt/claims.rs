use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session-token claims.
///
/// A token is a self-contained assertion: the subject it authenticates and
/// its validity window. Nothing else is carried, and nothing is persisted
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always `iat` plus the token lifetime
    pub exp: i64,
}

impl Claims {
    /// Build claims for a freshly authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Account identifier the token authenticates
    /// * `lifetime` - Validity window; expiry is exactly issuance + lifetime
    pub fn issue(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Build claims with an explicit issuance timestamp.
    ///
    /// Used by tests that need to place the validity window in the past or
    /// future; production issuance goes through [`Claims::issue`].
    pub fn issued_at(subject: impl ToString, issued_at: i64, lifetime: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + lifetime.num_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_window() {
        let claims = Claims::issue("account123", Duration::days(7));

        assert_eq!(claims.sub, "account123");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_issued_at_offsets_expiry() {
        let claims = Claims::issued_at("account123", 1_000_000, Duration::days(1));

        assert_eq!(claims.iat, 1_000_000);
        assert_eq!(claims.exp, 1_000_000 + 86_400);
    }
}
