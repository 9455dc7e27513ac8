use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use derive_more::derive::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid timezone {name:?}")]
pub struct InvalidTimezone {
    pub name: String,
}

pub fn parse_timezone(name: &str) -> Result<Tz, InvalidTimezone> {
    name.trim().parse::<Tz>().map_err(|_| InvalidTimezone { name: name.to_owned() })
}

/// Wall-clock time to instant. Ambiguous times resolve to the earlier instant,
/// times inside a DST gap are read as UTC wall clock.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> chrono::DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Whole hours between the Unix epoch and the given wall-clock time, both read as UTC.
pub fn absolute_hours(naive: &NaiveDateTime) -> i64 {
    naive.and_utc().timestamp().div_euclid(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Zurich"), Ok(chrono_tz::Europe::Zurich));
        assert_eq!(
            parse_timezone("Mars/Olympus"),
            Err(InvalidTimezone {
                name: "Mars/Olympus".to_owned()
            })
        );
        assert!(parse_timezone("").is_err());
    }

    #[test]
    fn test_absolute_hours_ignores_minutes() {
        assert_eq!(absolute_hours(&naive(1970, 1, 1, 1, 59)), 1);
        assert_eq!(
            absolute_hours(&naive(2024, 3, 1, 0, 0)) - absolute_hours(&naive(2024, 2, 29, 23, 30)),
            1
        );
    }

    #[test]
    fn test_localize_ambiguous_takes_earliest() {
        // 02:30 happens twice in Zurich on 2024-10-27
        let dt = localize(&chrono_tz::Europe::Zurich, naive(2024, 10, 27, 2, 30));

        assert_eq!(dt.to_rfc3339(), "2024-10-27T02:30:00+02:00");
    }

    #[test]
    fn test_localize_gap_reads_utc() {
        // 02:30 does not exist in Zurich on 2024-03-31
        let dt = localize(&chrono_tz::Europe::Zurich, naive(2024, 3, 31, 2, 30));

        assert_eq!(dt.naive_utc(), naive(2024, 3, 31, 2, 30));
    }
}
