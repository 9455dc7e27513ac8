use std::{fmt::Display, ops::Add};

use chrono_tz::Tz;
use tokio::task_local;

task_local! {
    pub static FIXED_NOW: DateTime;
}

/// An absolute instant. All zone-dependent views are derived explicitly via [`DateTime::in_zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    delegate: chrono::DateTime<chrono::Utc>,
}

impl DateTime {
    fn new<T: chrono::TimeZone>(delegate: chrono::DateTime<T>) -> Self {
        Self {
            delegate: delegate.with_timezone(&chrono::Utc),
        }
    }

    pub fn now() -> Self {
        FIXED_NOW
            .try_with(|t| *t)
            .unwrap_or_else(|_| chrono::Utc::now().into())
    }

    pub fn from_iso(iso8601: &str) -> anyhow::Result<Self> {
        Ok(chrono::DateTime::parse_from_rfc3339(iso8601)?.into())
    }

    pub fn in_zone(&self, tz: &Tz) -> chrono::DateTime<Tz> {
        self.delegate.with_timezone(tz)
    }

    pub fn timestamp(&self) -> i64 {
        self.delegate.timestamp()
    }

    pub fn checked_add(&self, duration: chrono::Duration) -> Option<Self> {
        self.delegate.checked_add_signed(duration).map(Self::new)
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate)
    }
}

impl Add<chrono::Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: chrono::Duration) -> Self::Output {
        Self::new(self.delegate + rhs)
    }
}

impl<T: chrono::TimeZone> From<chrono::DateTime<T>> for DateTime {
    fn from(val: chrono::DateTime<T>) -> Self {
        DateTime::new(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_normalized() {
        let a = DateTime::from_iso("2024-11-03T15:23:46+01:00").unwrap();
        let b = DateTime::from_iso("2024-11-03T14:23:46Z").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_in_zone_keeps_instant() {
        let dt = DateTime::from_iso("2024-07-01T10:00:00Z").unwrap();
        let berlin = dt.in_zone(&chrono_tz::Europe::Berlin);

        assert_eq!(berlin.to_rfc3339(), "2024-07-01T12:00:00+02:00");
        assert_eq!(DateTime::from(berlin), dt);
    }

    #[test]
    fn test_checked_add() {
        let dt = DateTime::from_iso("2024-11-03T15:00:00Z").unwrap();

        assert_eq!(
            dt.checked_add(chrono::Duration::minutes(30)),
            Some(DateTime::from_iso("2024-11-03T15:30:00Z").unwrap())
        );
        assert_eq!(dt.checked_add(chrono::Duration::weeks(99_999_999)), None);
    }

    #[tokio::test]
    async fn test_fixed_now() {
        let fixed = DateTime::from_iso("2024-11-03T15:23:46Z").unwrap();

        let now = FIXED_NOW.scope(fixed, async { DateTime::now() }).await;

        assert_eq!(now, fixed);
    }
}
