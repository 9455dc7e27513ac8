use anyhow::{Context, bail};
use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::core::Interval;
use crate::core::time::{DateTime, localize, parse_timezone};

#[derive(Debug, Clone, Default)]
pub struct Calendar {
    pub name: Option<String>,
    pub description: Option<String>,
    pub events: Vec<Interval>,
}

/// Reads the VEVENTs of an iCalendar document. Times without zone information are read in
/// `floating`. Events that cannot be read are skipped.
pub fn parse_calendar(content: &str, floating: &Tz) -> anyhow::Result<Calendar> {
    if !content.contains("BEGIN:VCALENDAR") {
        bail!("Response does not look like an iCalendar document");
    }

    let mut calendar = Calendar::default();
    let mut current: Option<RawEvent> = None;
    let mut nested = 0usize;

    for line in unfold(content) {
        let Some(property) = Property::parse(&line) else {
            continue;
        };

        let name = property.name.clone();

        match current.as_mut() {
            None => match name.as_str() {
                "BEGIN" if property.value == "VEVENT" => current = Some(RawEvent::default()),
                "X-WR-CALNAME" => calendar.name = Some(unescape_text(&property.value)),
                "X-WR-CALDESC" => calendar.description = Some(unescape_text(&property.value)),
                _ => {}
            },
            Some(event) => match name.as_str() {
                "BEGIN" => nested += 1,
                "END" if nested > 0 => nested -= 1,
                "END" if property.value == "VEVENT" => {
                    if let Some(event) = current.take() {
                        match event.into_interval(floating) {
                            Ok(interval) => calendar.events.push(interval),
                            Err(e) => tracing::warn!("Skipping calendar event: {:?}", e),
                        }
                    }
                }
                _ if nested == 0 => event.set(property),
                _ => {}
            },
        }
    }

    Ok(calendar)
}

/// Joins folded continuation lines (leading space or tab) back onto their property line
fn unfold(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for line in content.lines() {
        match (line.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(rest), Some(previous)) => previous.push_str(rest),
            _ => lines.push(line.to_owned()),
        }
    }

    lines
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Property {
    name: String,
    params: Vec<(String, String)>,
    value: String,
}

impl Property {
    fn parse(line: &str) -> Option<Self> {
        let colon = line.find(':')?;
        let (key_part, value) = (&line[..colon], &line[colon + 1..]);

        let mut parts = key_part.split(';');
        let name = parts.next()?.trim().to_uppercase();
        let params = parts
            .filter_map(|param| param.split_once('='))
            .map(|(k, v)| (k.trim().to_uppercase(), v.trim_matches('"').to_owned()))
            .collect();

        Some(Self {
            name,
            params,
            value: value.trim().to_owned(),
        })
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct RawEvent {
    start: Option<Property>,
    end: Option<Property>,
    duration: Option<String>,
}

impl RawEvent {
    fn set(&mut self, property: Property) {
        match property.name.as_str() {
            "DTSTART" => self.start = Some(property),
            "DTEND" => self.end = Some(property),
            "DURATION" => self.duration = Some(property.value),
            _ => {}
        }
    }

    fn into_interval(self, floating: &Tz) -> anyhow::Result<Interval> {
        let start_property = self.start.context("Event without DTSTART")?;
        let (start, all_day) = parse_time(&start_property, floating)?;

        let end = match (self.end, self.duration) {
            (Some(end), _) => parse_time(&end, floating)?.0,
            (None, Some(duration)) => start
                .checked_add(parse_duration(&duration)?)
                .with_context(|| format!("Duration {} out of range", duration))?,
            (None, None) if all_day => start + chrono::Duration::days(1),
            (None, None) => start,
        };

        Ok(Interval::new(start, end))
    }
}

/// Returns the instant and whether the value was a plain date
fn parse_time(property: &Property, floating: &Tz) -> anyhow::Result<(DateTime, bool)> {
    let value = property.value.as_str();
    let zone = match property.param("TZID") {
        Some(tzid) => parse_timezone(tzid).unwrap_or_else(|e| {
            tracing::warn!("{}, reading time in {}", e, floating);
            *floating
        }),
        None => *floating,
    };

    if property.param("VALUE") == Some("DATE") || value.len() == 8 {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d")
            .with_context(|| format!("Invalid date {}", value))?;
        let midnight = date.and_hms_opt(0, 0, 0).context("Invalid midnight")?;
        return Ok((localize(&zone, midnight).into(), true));
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S")
            .with_context(|| format!("Invalid date-time {}", value))?;
        return Ok((naive.and_utc().into(), false));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
        .with_context(|| format!("Invalid date-time {}", value))?;
    Ok((localize(&zone, naive).into(), false))
}

/// RFC 5545 duration such as `PT1H30M`, `P1D` or `-P2W`
fn parse_duration(value: &str) -> anyhow::Result<chrono::Duration> {
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let rest = rest
        .strip_prefix('P')
        .with_context(|| format!("Invalid duration {}", value))?;

    let mut total = chrono::Duration::zero();
    let mut number = String::new();
    let mut in_time = false;

    for c in rest.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }

        if c == 'T' {
            in_time = true;
            continue;
        }

        let amount: i64 = number
            .parse()
            .with_context(|| format!("Invalid duration {}", value))?;
        number.clear();

        let part = match (c, in_time) {
            ('W', false) => chrono::Duration::try_weeks(amount),
            ('D', false) => chrono::Duration::try_days(amount),
            ('H', true) => chrono::Duration::try_hours(amount),
            ('M', true) => chrono::Duration::try_minutes(amount),
            ('S', true) => chrono::Duration::try_seconds(amount),
            _ => bail!("Invalid duration {}", value),
        };

        total = part
            .and_then(|part| total.checked_add(&part))
            .with_context(|| format!("Duration {} out of range", value))?;
    }

    if !number.is_empty() {
        bail!("Invalid duration {}", value);
    }

    total
        .checked_mul(sign)
        .with_context(|| format!("Duration {} out of range", value))
}

fn unescape_text(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\N", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
}
