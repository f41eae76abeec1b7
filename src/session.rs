//! The Session Record: the persisted `{ authenticated, expires }` token
//! representing a logged-in state, plus its validity and renewal rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub authenticated: bool,
    /// Expiry instant, epoch milliseconds.
    pub expires: i64,
}

impl SessionRecord {
    /// A fresh record expiring one full duration from `now_ms`.
    ///
    /// Issuing records is the auth page's job, not the guard's; this exists
    /// for that flow and for tests.
    pub fn new(now_ms: i64, duration_ms: i64) -> Self {
        Self {
            authenticated: true,
            expires: now_ms + duration_ms,
        }
    }

    /// A record is valid iff it is authenticated and not yet expired.
    /// `expires == now` counts as expired.
    pub fn is_valid(&self, now_ms: i64) -> bool {
        self.authenticated && self.expires > now_ms
    }

    pub fn time_remaining_ms(&self, now_ms: i64) -> i64 {
        self.expires - now_ms
    }

    /// Sliding renewal: once more than half the fixed duration has elapsed,
    /// push `expires` out to a full duration from now. Below the half-life
    /// threshold the record is left untouched, so an idle user's session
    /// still lapses at the original expiry.
    ///
    /// Returns whether the record changed (the caller persists it then).
    pub fn renew_if_due(&mut self, now_ms: i64, duration_ms: i64) -> bool {
        if self.time_remaining_ms(now_ms) < duration_ms / 2 {
            self.expires = now_ms + duration_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SESSION_DURATION_MS as DURATION;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_valid_until_strictly_after_expiry() {
        let record = SessionRecord {
            authenticated: true,
            expires: NOW,
        };
        // expires == now is already expired
        assert!(!record.is_valid(NOW));
        assert!(!record.is_valid(NOW + 1));

        let record = SessionRecord {
            authenticated: true,
            expires: NOW + 1,
        };
        assert!(record.is_valid(NOW));
    }

    #[test]
    fn test_unauthenticated_record_is_invalid() {
        let record = SessionRecord {
            authenticated: false,
            expires: NOW + DURATION,
        };
        assert!(!record.is_valid(NOW));
    }

    #[test]
    fn test_renewal_below_half_life() {
        let mut record = SessionRecord {
            authenticated: true,
            expires: NOW + DURATION / 2 - 1,
        };
        assert!(record.renew_if_due(NOW, DURATION));
        assert_eq!(record.expires, NOW + DURATION);
    }

    #[test]
    fn test_no_renewal_at_or_above_half_life() {
        let original = NOW + DURATION / 2;
        let mut record = SessionRecord {
            authenticated: true,
            expires: original,
        };
        assert!(!record.renew_if_due(NOW, DURATION));
        assert_eq!(record.expires, original);
    }

    #[test]
    fn test_new_record_spans_full_duration() {
        let record = SessionRecord::new(NOW, DURATION);
        assert!(record.authenticated);
        assert_eq!(record.time_remaining_ms(NOW), DURATION);
    }

    #[test]
    fn test_record_json_shape() {
        // The wire shape is shared with the auth page: flat object with
        // exactly these two field names.
        let record = SessionRecord {
            authenticated: true,
            expires: 42,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"authenticated":true,"expires":42}"#);
    }
}
