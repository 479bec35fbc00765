use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::record::PersistentRecord;

/// Authenticated court-site session cached between runs.
///
/// Built by the login flow once authentication succeeds and persisted right
/// away. Later runs load it and log in again when it is absent or expired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_agent: String,
    cookies: String,
    /// Unix timestamp (seconds) at which the session stops being valid.
    #[serde(rename = "tempo_de_vida")]
    expires_at: i64,
}

/// Current wall-clock time as Unix seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

impl PersistentRecord for Session {
    const STORAGE_KEY: &'static str = "dados_sessao.json";
}

impl Session {
    pub fn new(user_agent: impl Into<String>, cookies: impl Into<String>, expires_at: i64) -> Self {
        Self { user_agent: user_agent.into(), cookies: cookies.into(), expires_at }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Serialized cookie jar, opaque to this crate.
    pub fn cookies(&self) -> &str {
        &self.cookies
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Whether the session has expired as of the current wall-clock time.
    /// Not memoized: each call reads the clock again.
    pub fn expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }

    /// Expiry is inclusive: a session is already expired at `expires_at` itself.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs_at(unix_now())
    }

    pub fn remaining_secs_at(&self, now: i64) -> u64 {
        u64::try_from(self.expires_at.saturating_sub(now)).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: i64) -> Session {
        Session::new("Mozilla/5.0", "session=abc123", expires_at)
    }

    #[test]
    fn storage_key_is_fixed() {
        assert_eq!(Session::STORAGE_KEY, "dados_sessao.json");
    }

    #[test]
    fn accessors_return_constructor_values() {
        let s = session(9_999_999_999);
        assert_eq!(s.user_agent(), "Mozilla/5.0");
        assert_eq!(s.cookies(), "session=abc123");
        assert_eq!(s.expires_at(), 9_999_999_999);
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let t = 1_000_000;
        let s = session(t);

        assert!(!s.is_expired_at(t - 1));
        assert!(s.is_expired_at(t));
        assert!(s.is_expired_at(t + 1));
    }

    #[test]
    fn expired_uses_current_time() {
        let now = Utc::now().timestamp();

        assert!(!session(now + 3600).expired());
        assert!(session(now - 3600).expired());
    }

    #[test]
    fn remaining_secs_saturates_at_zero() {
        let s = session(1_000_000);

        assert_eq!(s.remaining_secs_at(999_990), 10);
        assert_eq!(s.remaining_secs_at(1_000_000), 0);
        assert_eq!(s.remaining_secs_at(2_000_000), 0);
        assert_eq!(session(i64::MIN).remaining_secs_at(i64::MAX), 0);
    }

    #[test]
    fn remaining_is_zero_exactly_when_expired() {
        let t = 1_000_000;
        let s = session(t);

        for now in [t - 2, t - 1, t, t + 1] {
            assert_eq!(s.is_expired_at(now), s.remaining_secs_at(now) == 0, "now={now}");
        }
    }

    #[test]
    fn wire_format_keeps_legacy_field_names() -> Result<(), anyhow::Error> {
        let value: serde_json::Value = serde_json::from_slice(&session(42).to_bytes()?)?;

        assert_eq!(
            value,
            serde_json::json!({ "user_agent": "Mozilla/5.0", "cookies": "session=abc123", "tempo_de_vida": 42 })
        );
        Ok(())
    }

    #[test]
    fn payload_without_expiry_is_rejected() {
        let err = Session::from_bytes(br#"{"user_agent":"ua","cookies":"c","expires_at":1}"#).unwrap_err();
        assert!(matches!(err, crate::errors::ModelError::Validation(_)));
    }
}
